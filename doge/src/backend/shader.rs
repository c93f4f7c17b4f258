//! Shader backend interface.
//!
//! A backend implements [`Shader`] to compile stages, link programs and resolve uniform names, and
//! [`Uniformable`] once for every value type it can transfer to and from a uniform slot.

use crate::shader::{
  ProgramError, StageError, StageType, TessellationStages, UniformError, UniformLocation,
  UniformType,
};

/// Shader stages, programs and uniform resolution.
///
/// Representations (`StageRepr` and `ProgramRepr`) are expected to release their device
/// resources when dropped.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  type StageRepr;

  /// Backend representation of a linked shader program.
  type ProgramRepr;

  /// Compile a new shader stage from its source.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Link the given stages into a new program.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Resolve a uniform by name.
  ///
  /// Implementors must return [`UniformError::NotFound`] when the name doesn’t resolve in the
  /// program and [`UniformError::TypeMismatch`] when it resolves to a slot which declared type is
  /// not [`Uniformable::ty`].
  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<UniformLocation<T>, UniformError>
  where
    Self: Uniformable<T>;
}

/// Types that can be transferred to and from a uniform slot.
///
/// For any location returned by [`Shader::ask_uniform`], `fetch` must return the last value
/// passed to `update` for that location.
///
/// Matrix values are transferred column-major, as laid out by glam, and are never transposed.
/// Transpose a row-major matrix (`m.transpose()`) before assigning it.
pub unsafe trait Uniformable<T>: Shader {
  /// Reflected type of `T`, as it must be declared in shader sources.
  unsafe fn ty() -> UniformType;

  /// Upload a value to the device.
  unsafe fn update(program: &Self::ProgramRepr, location: &UniformLocation<T>, value: &T);

  /// Read the value currently held by the device.
  unsafe fn fetch(program: &Self::ProgramRepr, location: &UniformLocation<T>) -> T;
}
