//! Typed uniform accessors.
//!
//! A [`Uniform`] binds a resolved uniform slot of a [`Program`] to a locally cached value and keeps
//! both in sync: every operation changing the value (assignment, increment and decrement, compound
//! assignment) updates the cache and uploads it to the device before returning. Once the call
//! returns, reading the slot back from the device yields the cached value.
//!
//! A [`ConstUniform`] is the read-only counterpart. It reads the device value once, when it’s
//! created, and never talks to the device again.
//!
//! Both accessors behave like their underlying value for arithmetic and comparisons. Operands can
//! be raw values, accessors, or references to either (see [`Operand`]), and raw values can appear
//! on either side of a binary operator:
//!
//! ```ignore
//! let mut a = program.uniform("f.a", 0.05f32)?;
//! a += 0.1f32;
//!
//! assert_eq!(a, 0.15f32);
//! assert_eq!(&a + 1f32, 1f32 + &a);
//! assert_eq!(program.const_uniform::<f32, _>("f.a")?, a);
//! ```
//!
//! Binary operators and negation also accept an accessor by value. A `Uniform` used that way is
//! consumed; the device slot keeps its value, as when the accessor is dropped.
//!
//! Non-mutating operators never touch the device.
//!
//! Primitive types gain `PartialEq` and arithmetic impls against the accessors, so comparing a
//! primitive with the result of `.into()` needs an explicit target type:
//! `status == i32::from(flag)` rather than `status == flag.into()`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{
  Add, AddAssign, Deref, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::backend::shader::Uniformable;
use crate::shader::types::{
  Divisible, IVec2, IVec3, IVec4, Integral, Mat2, Mat3, Mat4, Step, UVec2, UVec3, UVec4, Vec2,
  Vec3, Vec4,
};
use crate::shader::{Program, UniformError, UniformLocation};

/// Anything that can stand on the right-hand side of a uniform operator.
pub trait Operand {
  /// Underlying value type.
  type Value: Copy;

  /// Get the underlying value.
  fn operand(&self) -> Self::Value;
}

macro_rules! impl_Operand {
  ($($t:ty),*) => {
    $(
      impl Operand for $t {
        type Value = $t;

        fn operand(&self) -> Self::Value {
          *self
        }
      }
    )*
  };
}

impl_Operand!(
  f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Mat2, Mat3, Mat4
);

impl<'a, R> Operand for &'a R
where
  R: ?Sized + Operand,
{
  type Value = R::Value;

  fn operand(&self) -> Self::Value {
    (**self).operand()
  }
}

/// A uniform which value is mirrored on the device.
///
/// The accessor borrows the program it was resolved from; dropping it leaves the slot and its last
/// uploaded value untouched.
pub struct Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
{
  program: &'p S::ProgramRepr,
  location: UniformLocation<T>,
  value: T,
}

impl<'p, S, T> Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy,
{
  /// Resolve `name` in `program`, upload `value` to it and cache it.
  ///
  /// Fails with [`UniformError::NotFound`] if `name` isn’t an active uniform of `program`, and with
  /// [`UniformError::TypeMismatch`] if it’s declared with another type than `T`.
  pub fn new<N>(program: &'p Program<S>, name: N, value: T) -> Result<Self, UniformError>
  where
    N: AsRef<str>,
  {
    let name = name.as_ref();
    let location = unsafe { S::ask_uniform::<T>(&program.repr, name)? };
    log::debug!("uniform {} bound at location {}", name, location.index());

    let uniform = Uniform {
      program: &program.repr,
      location,
      value,
    };
    uniform.sync();

    Ok(uniform)
  }

  /// Cached value, which is also the device value.
  pub fn get(&self) -> T {
    self.value
  }

  /// Location of the uniform in its program.
  pub fn location(&self) -> &UniformLocation<T> {
    &self.location
  }

  /// Assign a new value.
  pub fn set(&mut self, value: T) {
    self.value = value;
    self.sync();
  }

  /// Apply `f` to the value and keep the result.
  pub fn modify<F>(&mut self, f: F)
  where
    F: FnOnce(T) -> T,
  {
    self.value = f(self.value);
    self.sync();
  }

  fn sync(&self) {
    log::trace!("syncing uniform at location {}", self.location.index());
    unsafe { S::update(self.program, &self.location, &self.value) };
  }
}

impl<'p, S, T> Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Step,
{
  /// Add one to the value and return the new value.
  pub fn incr(&mut self) -> T {
    self.modify(|v| v + T::ONE);
    self.value
  }

  /// Subtract one from the value and return the new value.
  pub fn decr(&mut self) -> T {
    self.modify(|v| v - T::ONE);
    self.value
  }

  /// Add one to the value and return the previous value.
  pub fn post_incr(&mut self) -> T {
    let prev = self.value;
    self.incr();
    prev
  }

  /// Subtract one from the value and return the previous value.
  pub fn post_decr(&mut self) -> T {
    let prev = self.value;
    self.decr();
    prev
  }
}

impl<'p, S, T> Deref for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
{
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.value
  }
}

impl<'p, S, T> fmt::Debug for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("Uniform")
      .field("location", &self.location)
      .field("value", &self.value)
      .finish()
  }
}

impl<'p, S, T> Operand for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy,
{
  type Value = T;

  fn operand(&self) -> Self::Value {
    self.value
  }
}

/// A read-only snapshot of a uniform.
///
/// The value is read from the device when the snapshot is created; later writes to the slot are
/// not observed.
pub struct ConstUniform<T> {
  location: UniformLocation<T>,
  value: T,
}

impl<T> ConstUniform<T>
where
  T: Copy,
{
  /// Resolve `name` in `program` and read its device value.
  ///
  /// Fails the same way as [`Uniform::new`]. Nothing is uploaded.
  pub fn new<S, N>(program: &Program<S>, name: N) -> Result<Self, UniformError>
  where
    S: ?Sized + Uniformable<T>,
    N: AsRef<str>,
  {
    let location = unsafe { S::ask_uniform::<T>(&program.repr, name.as_ref())? };
    let value = unsafe { S::fetch(&program.repr, &location) };

    Ok(ConstUniform { location, value })
  }

  /// Value read at creation time.
  pub fn get(&self) -> T {
    self.value
  }

  /// Location of the uniform in its program.
  pub fn location(&self) -> &UniformLocation<T> {
    &self.location
  }
}

impl<T> Clone for ConstUniform<T>
where
  T: Copy,
{
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for ConstUniform<T> where T: Copy {}

impl<T> Deref for ConstUniform<T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    &self.value
  }
}

impl<T> fmt::Debug for ConstUniform<T>
where
  T: fmt::Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_struct("ConstUniform")
      .field("location", &self.location)
      .field("value", &self.value)
      .finish()
  }
}

impl<T> Operand for ConstUniform<T>
where
  T: Copy,
{
  type Value = T;

  fn operand(&self) -> Self::Value {
    self.value
  }
}

// compound assignment; the only operators writing to the device
macro_rules! impl_compound_assign {
  ($op:ident, $f:ident, $bin:ident, $bin_f:ident $(, $cap:ident)?) => {
    impl<'p, S, T, R> $op<R> for Uniform<'p, S, T>
    where
      S: ?Sized + Uniformable<T>,
      T: Copy + $bin<R::Value, Output = T> $(+ $cap)?,
      R: Operand,
    {
      fn $f(&mut self, rhs: R) {
        let rhs = rhs.operand();
        self.modify(|v| $bin::$bin_f(v, rhs));
      }
    }
  };
}

impl_compound_assign!(AddAssign, add_assign, Add, add);
impl_compound_assign!(SubAssign, sub_assign, Sub, sub);
impl_compound_assign!(MulAssign, mul_assign, Mul, mul);
impl_compound_assign!(DivAssign, div_assign, Div, div, Divisible);
impl_compound_assign!(RemAssign, rem_assign, Rem, rem, Integral);

// binary operators with the accessor on the left-hand side
macro_rules! impl_binary_op {
  ($op:ident, $f:ident $(, $cap:ident)?) => {
    impl<'a, 'p, S, T, R> $op<R> for &'a Uniform<'p, S, T>
    where
      S: ?Sized + Uniformable<T>,
      T: Copy + $op<R::Value> $(+ $cap)?,
      R: Operand,
    {
      type Output = <T as $op<R::Value>>::Output;

      fn $f(self, rhs: R) -> Self::Output {
        $op::$f(self.value, rhs.operand())
      }
    }

    impl<'p, S, T, R> $op<R> for Uniform<'p, S, T>
    where
      S: ?Sized + Uniformable<T>,
      T: Copy + $op<R::Value> $(+ $cap)?,
      R: Operand,
    {
      type Output = <T as $op<R::Value>>::Output;

      fn $f(self, rhs: R) -> Self::Output {
        $op::$f(self.value, rhs.operand())
      }
    }

    impl<T, R> $op<R> for ConstUniform<T>
    where
      T: Copy + $op<R::Value> $(+ $cap)?,
      R: Operand,
    {
      type Output = <T as $op<R::Value>>::Output;

      fn $f(self, rhs: R) -> Self::Output {
        $op::$f(self.value, rhs.operand())
      }
    }

    impl<'a, T, R> $op<R> for &'a ConstUniform<T>
    where
      T: Copy + $op<R::Value> $(+ $cap)?,
      R: Operand,
    {
      type Output = <T as $op<R::Value>>::Output;

      fn $f(self, rhs: R) -> Self::Output {
        $op::$f(self.value, rhs.operand())
      }
    }
  };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div, Divisible);
impl_binary_op!(Rem, rem, Integral);

// binary operators with a raw value on the left-hand side
macro_rules! impl_raw_lhs_op {
  ($op:ident, $f:ident, $cap:path; $($raw:ty),*) => {
    $(
      impl<'a, 'p, S, T> $op<&'a Uniform<'p, S, T>> for $raw
      where
        S: ?Sized + Uniformable<T>,
        T: $cap,
        $raw: $op<T>,
      {
        type Output = <$raw as $op<T>>::Output;

        fn $f(self, rhs: &'a Uniform<'p, S, T>) -> Self::Output {
          $op::$f(self, rhs.value)
        }
      }

      impl<'p, S, T> $op<Uniform<'p, S, T>> for $raw
      where
        S: ?Sized + Uniformable<T>,
        T: $cap,
        $raw: $op<T>,
      {
        type Output = <$raw as $op<T>>::Output;

        fn $f(self, rhs: Uniform<'p, S, T>) -> Self::Output {
          $op::$f(self, rhs.value)
        }
      }

      impl<T> $op<ConstUniform<T>> for $raw
      where
        T: $cap,
        $raw: $op<T>,
      {
        type Output = <$raw as $op<T>>::Output;

        fn $f(self, rhs: ConstUniform<T>) -> Self::Output {
          $op::$f(self, rhs.value)
        }
      }

      impl<'a, T> $op<&'a ConstUniform<T>> for $raw
      where
        T: $cap,
        $raw: $op<T>,
      {
        type Output = <$raw as $op<T>>::Output;

        fn $f(self, rhs: &'a ConstUniform<T>) -> Self::Output {
          $op::$f(self, rhs.value)
        }
      }
    )*
  };
}

impl_raw_lhs_op!(
  Add, add, Copy; f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Mat2, Mat3,
  Mat4
);
impl_raw_lhs_op!(
  Sub, sub, Copy; f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Mat2, Mat3,
  Mat4
);
impl_raw_lhs_op!(
  Mul, mul, Copy; f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Mat2, Mat3,
  Mat4
);
impl_raw_lhs_op!(
  Div, div, Divisible; f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4
);
impl_raw_lhs_op!(Rem, rem, Integral; i32, u32, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4);

impl<'a, 'p, S, T> Neg for &'a Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy + Neg,
{
  type Output = T::Output;

  fn neg(self) -> Self::Output {
    -self.value
  }
}

impl<'p, S, T> Neg for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy + Neg,
{
  type Output = T::Output;

  fn neg(self) -> Self::Output {
    -self.value
  }
}

impl<T> Neg for ConstUniform<T>
where
  T: Copy + Neg,
{
  type Output = T::Output;

  fn neg(self) -> Self::Output {
    -self.value
  }
}

impl<'a, T> Neg for &'a ConstUniform<T>
where
  T: Copy + Neg,
{
  type Output = T::Output;

  fn neg(self) -> Self::Output {
    -self.value
  }
}

// comparisons; only the underlying values are compared
impl<'p, S, T, R> PartialEq<R> for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy + PartialEq<R::Value>,
  R: Operand,
{
  fn eq(&self, rhs: &R) -> bool {
    self.value == rhs.operand()
  }
}

impl<'p, S, T, R> PartialOrd<R> for Uniform<'p, S, T>
where
  S: ?Sized + Uniformable<T>,
  T: Copy + PartialOrd<R::Value>,
  R: Operand,
{
  fn partial_cmp(&self, rhs: &R) -> Option<Ordering> {
    self.value.partial_cmp(&rhs.operand())
  }
}

impl<T, R> PartialEq<R> for ConstUniform<T>
where
  T: Copy + PartialEq<R::Value>,
  R: Operand,
{
  fn eq(&self, rhs: &R) -> bool {
    self.value == rhs.operand()
  }
}

impl<T, R> PartialOrd<R> for ConstUniform<T>
where
  T: Copy + PartialOrd<R::Value>,
  R: Operand,
{
  fn partial_cmp(&self, rhs: &R) -> Option<Ordering> {
    self.value.partial_cmp(&rhs.operand())
  }
}

macro_rules! impl_raw_lhs_cmp {
  ($($raw:ty),*) => {
    $(
      impl<'p, S, T> PartialEq<Uniform<'p, S, T>> for $raw
      where
        S: ?Sized + Uniformable<T>,
        T: Copy,
        $raw: PartialEq<T>,
      {
        fn eq(&self, rhs: &Uniform<'p, S, T>) -> bool {
          *self == rhs.value
        }
      }

      impl<'p, S, T> PartialOrd<Uniform<'p, S, T>> for $raw
      where
        S: ?Sized + Uniformable<T>,
        T: Copy,
        $raw: PartialOrd<T>,
      {
        fn partial_cmp(&self, rhs: &Uniform<'p, S, T>) -> Option<Ordering> {
          self.partial_cmp(&rhs.value)
        }
      }

      impl<T> PartialEq<ConstUniform<T>> for $raw
      where
        T: Copy,
        $raw: PartialEq<T>,
      {
        fn eq(&self, rhs: &ConstUniform<T>) -> bool {
          *self == rhs.value
        }
      }

      impl<T> PartialOrd<ConstUniform<T>> for $raw
      where
        T: Copy,
        $raw: PartialOrd<T>,
      {
        fn partial_cmp(&self, rhs: &ConstUniform<T>) -> Option<Ordering> {
          self.partial_cmp(&rhs.value)
        }
      }
    )*
  };
}

impl_raw_lhs_cmp!(
  f32, i32, u32, Vec2, Vec3, Vec4, IVec2, IVec3, IVec4, UVec2, UVec3, UVec4, Mat2, Mat3, Mat4
);
