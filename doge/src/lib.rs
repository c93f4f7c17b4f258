//! # doge, a thin and typed layer over OpenGL shader uniforms
//!
//! doge wraps shader stages, shader programs and, most importantly, shader uniforms. Its main
//! type, [`Uniform`](shader::Uniform), is a local proxy for a value living on the GPU: it holds a
//! copy of the value, exposes it through ordinary Rust operators and uploads it every time it
//! changes. After any mutation returns, the GPU and the proxy agree.
//!
//! ```ignore
//! use doge::shader::{Program, Uniform};
//!
//! let program = Program::from_strings(&mut ctx, VS, None, None, FS)?;
//! let mut a = Uniform::new(&program, "f.a", 0.05f32)?;
//! a += 0.1f32;
//!
//! assert_eq!(a, 0.15f32);
//! assert_eq!(program.const_uniform::<f32, _>("f.a")?, 0.15f32);
//! ```
//!
//! # What’s included?
//!
//! - **Shaders**: compilation of stages (from strings or files) and linking into programs. See
//!   [`shader`].
//! - **Uniforms**: synchronized accessors ([`Uniform`](shader::Uniform)), read-only snapshots
//!   ([`ConstUniform`](shader::ConstUniform)) and the closed set of supported value types
//!   ([`shader::types`]).
//!
//! Anything else (vertex arrays, textures, input handling, the render loop) is left to the graphics
//! API and windowing crate you use.
//!
//! # Architecture
//!
//! This crate is backend-agnostic. Types are parameterized by a backend type `S` implementing the
//! traits of [`backend`]. The OpenGL 3.3 backend lives in the `doge-gl` crate; the `doge-glfw`
//! crate creates a window and a context for it.

pub mod backend;
pub mod context;
pub mod shader;

pub use glam;
