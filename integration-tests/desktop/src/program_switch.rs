//! Uploads keep targeting the right program when several are alive, and after one is dropped.

use doge::shader::Program;
use doge_gl::GL33;
use doge_glfw::GlfwSurface;
use doge_windowing::WindowOpt;

const VS: &str = "
void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

const FS: &str = "
uniform float t;

out vec4 frag;

void main() {
  frag = vec4(t, t, t, 1.);
}";

pub fn fixture() {
  let mut surface = GlfwSurface::new_gl33("Program switch", WindowOpt::default()).unwrap();

  let program_a: Program<GL33> =
    Program::from_strings(&mut surface.context, VS, None, None, FS).unwrap();
  let program_b: Program<GL33> =
    Program::from_strings(&mut surface.context, VS, None, None, FS).unwrap();

  let mut a = program_a.uniform("t", 1f32).unwrap();
  let mut b = program_b.uniform("t", 2f32).unwrap();

  for _ in 0..4 {
    a += 1f32;
    b *= 2f32;
  }

  assert_eq!(program_a.const_uniform::<f32, _>("t").unwrap(), 5f32);
  assert_eq!(program_b.const_uniform::<f32, _>("t").unwrap(), 32f32);

  drop(a);
  drop(program_a);

  let program_c: Program<GL33> =
    Program::from_strings(&mut surface.context, VS, None, None, FS).unwrap();
  program_c.set("t", 42f32).unwrap();
  b.incr();

  assert_eq!(program_c.const_uniform::<f32, _>("t").unwrap(), 42f32);
  assert_eq!(program_b.const_uniform::<f32, _>("t").unwrap(), 33f32);
}
