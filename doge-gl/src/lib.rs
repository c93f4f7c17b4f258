//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for
//! [doge](https://crates.io/crates/doge). Pick a backend type and use it as the `S` parameter of
//! doge’s programs and uniforms; a windowing crate such as `doge-glfw` builds it for you once an
//! OpenGL context is current.

#[cfg(feature = "gl33")]
pub mod gl33;

#[cfg(feature = "gl33")]
pub use gl33::GL33;
