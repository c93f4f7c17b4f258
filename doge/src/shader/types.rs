//! Uniform value types.
//!
//! Scalars are plain Rust numbers; vectors and matrices are [glam](https://crates.io/crates/glam)
//! types, re-exported here. The set is closed: a backend implements
//! [`Uniformable`](crate::backend::shader::Uniformable) for exactly these types.
//!
//! A few marker traits refine which operators a [`Uniform`](crate::shader::Uniform) exposes on
//! top of what the value type itself supports:
//!
//! - [`Divisible`]: `/` and `/=`. Matrices are not divisible.
//! - [`Integral`]: `%` and `%=`. Only integral scalars and vectors.
//! - [`Step`]: increment and decrement. Every type; each component (or matrix element) moves by
//!   one.

use std::ops::{Add, Sub};

pub use glam::{IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4};

/// Value types supporting division.
pub trait Divisible: Copy {}

/// Value types supporting the remainder operation.
pub trait Integral: Divisible {}

/// Value types that can be incremented and decremented.
pub trait Step: Copy + Add<Output = Self> + Sub<Output = Self> {
  /// The unit step; every component is one.
  const ONE: Self;
}

macro_rules! impl_value_caps {
  (integral $($t:ty),*) => {
    $(
      impl Divisible for $t {}
      impl Integral for $t {}
    )*
  };

  (floating $($t:ty),*) => {
    $(
      impl Divisible for $t {}
    )*
  };
}

impl_value_caps!(integral i32, u32, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4);
impl_value_caps!(floating f32, Vec2, Vec3, Vec4);

macro_rules! impl_Step {
  ($($t:ty => $one:expr),* $(,)?) => {
    $(
      impl Step for $t {
        const ONE: Self = $one;
      }
    )*
  };
}

impl_Step!(
  f32 => 1.,
  i32 => 1,
  u32 => 1,
  Vec2 => Vec2::ONE,
  Vec3 => Vec3::ONE,
  Vec4 => Vec4::ONE,
  IVec2 => IVec2::ONE,
  IVec3 => IVec3::ONE,
  IVec4 => IVec4::ONE,
  UVec2 => UVec2::ONE,
  UVec3 => UVec3::ONE,
  UVec4 => UVec4::ONE,
  Mat2 => Mat2::from_cols_array(&[1.; 4]),
  Mat3 => Mat3::from_cols_array(&[1.; 9]),
  Mat4 => Mat4::from_cols_array(&[1.; 16]),
);
