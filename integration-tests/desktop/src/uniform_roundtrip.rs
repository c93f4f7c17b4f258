//! Every supported type survives a trip to the GPU and back, through every mutating operator.

use doge::backend::shader::Uniformable;
use doge::glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};
use doge::shader::{ConstUniform, Operand, Program, Uniform};
use doge_gl::GL33;
use doge_glfw::GlfwSurface;
use doge_windowing::WindowOpt;
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};
use std::path::Path;

pub fn program(surface: &mut GlfwSurface) -> Program<GL33> {
  let shaders = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/shaders");

  Program::from_files(
    &mut surface.context,
    shaders.join("uniforms.vert.glsl"),
    None,
    None,
    shaders.join("uniforms.frag.glsl"),
  )
  .expect("uniforms program")
}

fn check_on_device<T>(uniform: &Uniform<GL33, T>, program: &Program<GL33>, name: &str)
where
  GL33: Uniformable<T>,
  T: Copy + Debug + PartialEq,
{
  let device = ConstUniform::<T>::new(program, name).unwrap();
  assert_eq!(uniform, &device, "{} out of sync", name);
}

fn check_roundtrip<T>(program: &Program<GL33>, name: &str, first: T, second: T)
where
  GL33: Uniformable<T>,
  T: Operand<Value = T> + Copy + Debug + PartialEq,
  T: Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
  let mut a = Uniform::new(program, name, first).unwrap();
  check_on_device(&a, program, name);

  a += second;
  assert_eq!(a, first + second);
  check_on_device(&a, program, name);

  a -= second;
  assert_eq!(a, first);
  check_on_device(&a, program, name);

  a *= second;
  assert_eq!(a, first * second);
  check_on_device(&a, program, name);

  a.set(second);
  check_on_device(&a, program, name);

  let b = program.uniform(name, first).unwrap();
  assert_eq!(program.const_uniform::<T, _>(name).unwrap(), b);
}

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Uniform roundtrip", WindowOpt::default()).unwrap();
  let program = program(&mut surface);

  let mut a = Uniform::new(&program, "f.a", 0.05f32).unwrap();
  a += 0.1f32;
  assert_eq!(a, 0.15f32);
  assert_eq!(ConstUniform::<f32>::new(&program, "f.a").unwrap(), 0.15f32);

  check_roundtrip(&program, "f.b", 0.5f32, 5.);
  check_roundtrip(&program, "i.b", -32767i32, 65);
  check_roundtrip(&program, "u.b", 15u32, 16);

  check_roundtrip(&program, "v2.b", Vec2::new(0.25, 0.5), Vec2::new(1.5, -2.));
  check_roundtrip(&program, "iv2.b", IVec2::new(-7, 21), IVec2::new(30, -40));
  check_roundtrip(&program, "uv2.b", UVec2::new(7, 21), UVec2::new(30, 40));

  check_roundtrip(
    &program,
    "v3.b",
    Vec3::new(0.25, 0.5, 1.25),
    Vec3::new(1.5, -2., 0.75),
  );
  check_roundtrip(&program, "iv3.b", IVec3::new(-7, 21, 5), IVec3::new(30, -40, 3));
  check_roundtrip(&program, "uv3.b", UVec3::new(7, 21, 5), UVec3::new(30, 40, 3));

  check_roundtrip(
    &program,
    "v4.b",
    Vec4::new(0.25, 0.5, 1.25, -4.),
    Vec4::new(1.5, -2., 0.75, 8.),
  );
  check_roundtrip(
    &program,
    "iv4.b",
    IVec4::new(-7, 21, 5, 9),
    IVec4::new(30, -40, 3, 4),
  );
  check_roundtrip(
    &program,
    "uv4.b",
    UVec4::new(7, 21, 5, 9),
    UVec4::new(30, 40, 3, 4),
  );

  check_roundtrip(
    &program,
    "m2.b",
    Mat2::from_cols_array(&[1., 2., 3., 4.]),
    Mat2::from_cols_array(&[0.5, -1., 2., 0.25]),
  );
  check_roundtrip(
    &program,
    "m3.b",
    Mat3::from_cols_array(&[1., 2., 3., 4., 5., 6., 7., 8., 9.]),
    Mat3::IDENTITY,
  );
  check_roundtrip(
    &program,
    "m4.b",
    Mat4::from_cols_array(&[
      1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14., 15., 16.,
    ]),
    Mat4::from_scale(Vec3::new(2., 0.5, -1.)),
  );

  // divisions and remainders on integral slots
  let mut i = program.uniform("i.c", 650356i32).unwrap();
  i /= 7;
  i %= 100;
  check_on_device(&i, &program, "i.c");

  let mut uv = program.uniform("uv3.c", UVec3::new(10, 20, 30)).unwrap();
  uv.incr();
  uv %= UVec3::splat(4);
  assert_eq!(uv, UVec3::new(3, 1, 3));
  check_on_device(&uv, &program, "uv3.c");

  let mut m = program.uniform("m3.c", Mat3::IDENTITY).unwrap();
  m.incr();
  assert_eq!(m, Mat3::IDENTITY + Mat3::from_cols_array(&[1.; 9]));
  check_on_device(&m, &program, "m3.c");
}
