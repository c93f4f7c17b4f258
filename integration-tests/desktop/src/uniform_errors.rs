//! Resolution failures reported by the GL backend.

use doge::glam::{Mat4, UVec2, Vec3};
use doge::shader::{ConstUniform, Program, UniformError, UniformType};
use doge_gl::GL33;
use doge_glfw::GlfwSurface;
use doge_windowing::WindowOpt;

const VS: &str = "
void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

const FS: &str = "
uniform vec3 color;
uniform float unused;

out vec4 frag;

void main() {
  frag = vec4(color, 1.);
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Uniform errors", WindowOpt::default()).unwrap();
  let program: Program<GL33> =
    Program::from_strings(&mut surface.context, VS, None, None, FS).unwrap();

  assert!(program.uniform("color", Vec3::ONE).is_ok());

  assert_eq!(
    program.uniform("dne", Vec3::ONE).map(|_| ()),
    Err(UniformError::not_found("dne"))
  );
  assert!(matches!(
    ConstUniform::<Mat4>::new(&program, "dne"),
    Err(UniformError::NotFound(_))
  ));

  // declared but optimized out by the compiler
  assert!(matches!(
    program.uniform("unused", 1f32),
    Err(UniformError::NotFound(_))
  ));

  assert_eq!(
    program.uniform("color", UVec2::ONE).map(|_| ()),
    Err(UniformError::type_mismatch("color", UniformType::UIVec2))
  );

  assert!(matches!(
    program.uniform("col\0or", Vec3::ONE),
    Err(UniformError::NotFound(_))
  ));

  let link_error = Program::<GL33>::from_strings(
    &mut surface.context,
    VS,
    None,
    None,
    "void main() { not glsl }",
  );
  assert!(link_error.is_err());
}
