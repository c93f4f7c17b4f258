//! Shader API.
//!
//! Shader stages are compiled from GLSL sources (strings or files) and linked into a [`Program`].
//! A program is then used to resolve named uniforms, either as a synchronized [`Uniform`] or as a
//! read-only [`ConstUniform`] snapshot.

pub mod types;
pub mod uniform;

use std::error;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::backend::shader::{Shader, Uniformable};
use crate::context::GraphicsContext;

pub use self::uniform::{ConstUniform, Operand, Uniform};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Tessellation control shader.
  TessellationControlShader,
  /// Tessellation evaluation shader.
  TessellationEvaluationShader,
  /// Geometry shader.
  GeometryShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::TessellationControlShader => f.write_str("tessellation control shader"),
      StageType::TessellationEvaluationShader => f.write_str("tessellation evaluation shader"),
      StageType::GeometryShader => f.write_str("geometry shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
  /// Occurs when you try to create a shader which type is not supported on the current hardware.
  UnsupportedType(StageType),
  /// Occurs when the source file of a stage cannot be read.
  SourceUnreadable(PathBuf, String),
}

impl StageError {
  /// Occurs when a shader fails to compile.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }

  /// Occurs when you try to create a shader which type is not supported on the current hardware.
  pub fn unsupported_type(ty: StageType) -> Self {
    StageError::UnsupportedType(ty)
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),

      StageError::UnsupportedType(ty) => write!(f, "unsupported {}", ty),

      StageError::SourceUnreadable(ref path, ref r) => {
        write!(f, "cannot read shader source {}: {}", path.display(), r)
      }
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile or validate its state.
  StageError(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Program link failed.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Errors raised when resolving a uniform.
///
/// Resolution is a static property of a linked program: none of these errors is transient.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformError {
  /// The name doesn’t resolve to any active uniform of the program.
  NotFound(String),
  /// The name resolves but the uniform is declared with a type incompatible with the requested
  /// one.
  ///
  /// The `String` is the name of the uniform; the [`UniformType`] is the requested type.
  TypeMismatch(String, UniformType),
}

impl UniformError {
  /// Create a not-found error.
  pub fn not_found<N>(name: N) -> Self
  where
    N: Into<String>,
  {
    UniformError::NotFound(name.into())
  }

  /// Create a type mismatch.
  pub fn type_mismatch<N>(name: N, ty: UniformType) -> Self
  where
    N: Into<String>,
  {
    UniformError::TypeMismatch(name.into(), ty)
  }
}

impl fmt::Display for UniformError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformError::NotFound(ref s) => write!(f, "uniform {} not found", s),

      UniformError::TypeMismatch(ref n, ref t) => {
        write!(f, "type mismatch for uniform {}: expected {}", n, t)
      }
    }
  }
}

impl error::Error for UniformError {}

/// Type of a uniform.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UniformType {
  // scalars
  /// 32-bit signed integer.
  Int,
  /// 32-bit unsigned integer.
  UInt,
  /// 32-bit floating-point number.
  Float,

  // vectors
  /// 2D signed integral vector.
  IVec2,
  /// 3D signed integral vector.
  IVec3,
  /// 4D signed integral vector.
  IVec4,
  /// 2D unsigned integral vector.
  UIVec2,
  /// 3D unsigned integral vector.
  UIVec3,
  /// 4D unsigned integral vector.
  UIVec4,
  /// 2D floating-point vector.
  Vec2,
  /// 3D floating-point vector.
  Vec3,
  /// 4D floating-point vector.
  Vec4,

  // matrices
  /// 2×2 floating-point matrix.
  M22,
  /// 3×3 floating-point matrix.
  M33,
  /// 4×4 floating-point matrix.
  M44,
}

impl UniformType {
  /// Parse a GLSL type name, such as `"vec3"` or `"uint"`.
  pub fn from_glsl(name: &str) -> Option<Self> {
    let ty = match name {
      "int" => UniformType::Int,
      "uint" => UniformType::UInt,
      "float" => UniformType::Float,
      "ivec2" => UniformType::IVec2,
      "ivec3" => UniformType::IVec3,
      "ivec4" => UniformType::IVec4,
      "uvec2" => UniformType::UIVec2,
      "uvec3" => UniformType::UIVec3,
      "uvec4" => UniformType::UIVec4,
      "vec2" => UniformType::Vec2,
      "vec3" => UniformType::Vec3,
      "vec4" => UniformType::Vec4,
      "mat2" => UniformType::M22,
      "mat3" => UniformType::M33,
      "mat4" => UniformType::M44,
      _ => return None,
    };

    Some(ty)
  }
}

impl fmt::Display for UniformType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformType::Int => f.write_str("int"),
      UniformType::UInt => f.write_str("uint"),
      UniformType::Float => f.write_str("float"),
      UniformType::IVec2 => f.write_str("ivec2"),
      UniformType::IVec3 => f.write_str("ivec3"),
      UniformType::IVec4 => f.write_str("ivec4"),
      UniformType::UIVec2 => f.write_str("uvec2"),
      UniformType::UIVec3 => f.write_str("uvec3"),
      UniformType::UIVec4 => f.write_str("uvec4"),
      UniformType::Vec2 => f.write_str("vec2"),
      UniformType::Vec3 => f.write_str("vec3"),
      UniformType::Vec4 => f.write_str("vec4"),
      UniformType::M22 => f.write_str("mat2"),
      UniformType::M33 => f.write_str("mat3"),
      UniformType::M44 => f.write_str("mat4"),
    }
  }
}

/// A resolved uniform slot.
///
/// The type parameter is the value type the slot was resolved for; a location can only be used to
/// transfer values of that type.
pub struct UniformLocation<T>
where
  T: ?Sized,
{
  index: i32,
  _t: PhantomData<*const T>,
}

impl<T> UniformLocation<T>
where
  T: ?Sized,
{
  /// Create a location from a backend index.
  ///
  /// # Safety
  ///
  /// `index` must have been resolved by a backend for a slot declared with the type of `T`.
  pub unsafe fn new(index: i32) -> Self {
    UniformLocation {
      index,
      _t: PhantomData,
    }
  }

  /// Backend index of the slot.
  pub fn index(&self) -> i32 {
    self.index
  }
}

impl<T> Clone for UniformLocation<T>
where
  T: ?Sized,
{
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for UniformLocation<T> where T: ?Sized {}

impl<T> fmt::Debug for UniformLocation<T>
where
  T: ?Sized,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    f.debug_tuple("UniformLocation").field(&self.index).finish()
  }
}

/// Tessellation stages, grouped because they go in pair.
#[derive(Debug)]
pub struct TessellationStages<'a, S>
where
  S: ?Sized,
{
  /// Tessellation control representation.
  pub control: &'a S,
  /// Tessellation evaluation representation.
  pub evaluation: &'a S,
}

impl<'a, S> Clone for TessellationStages<'a, S>
where
  S: ?Sized,
{
  fn clone(&self) -> Self {
    *self
  }
}

impl<'a, S> Copy for TessellationStages<'a, S> where S: ?Sized {}

/// A compiled shader stage.
pub struct Stage<S>
where
  S: ?Sized + Shader,
{
  repr: S::StageRepr,
}

impl<S> Stage<S>
where
  S: ?Sized + Shader,
{
  /// Compile a stage from its source.
  pub fn new<C, R>(ctx: &mut C, ty: StageType, src: R) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = S>,
    R: AsRef<str>,
  {
    unsafe {
      ctx
        .backend()
        .new_stage(ty, src.as_ref())
        .map(|repr| Stage { repr })
    }
  }

  /// Read the source of a stage from a file and compile it.
  pub fn from_file<C, P>(ctx: &mut C, ty: StageType, path: P) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = S>,
    P: AsRef<Path>,
  {
    let path = path.as_ref();
    let src = fs::read_to_string(path)
      .map_err(|e| StageError::SourceUnreadable(path.to_owned(), e.to_string()))?;

    log::debug!("compiling {} from {}", ty, path.display());
    Self::new(ctx, ty, src)
  }
}

/// A linked shader program.
///
/// Uniform accessors borrow the program they were resolved from, so they cannot outlive it.
pub struct Program<S>
where
  S: ?Sized + Shader,
{
  pub(crate) repr: S::ProgramRepr,
}

impl<S> Program<S>
where
  S: ?Sized + Shader,
{
  /// Link a program from already compiled stages.
  pub fn from_stages<C>(
    ctx: &mut C,
    vertex: &Stage<S>,
    tess: Option<TessellationStages<Stage<S>>>,
    geometry: Option<&Stage<S>>,
    fragment: &Stage<S>,
  ) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = S>,
  {
    let repr = unsafe {
      ctx.backend().new_program(
        &vertex.repr,
        tess.map(|stages| TessellationStages {
          control: &stages.control.repr,
          evaluation: &stages.evaluation.repr,
        }),
        geometry.map(|stage| &stage.repr),
        &fragment.repr,
      )?
    };

    Ok(Program { repr })
  }

  /// Compile stages from their sources and link them.
  pub fn from_strings<'a, C, V, T, G, F>(
    ctx: &mut C,
    vertex: V,
    tess: T,
    geometry: G,
    fragment: F,
  ) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = S>,
    V: AsRef<str> + 'a,
    T: Into<Option<TessellationStages<'a, str>>>,
    G: Into<Option<&'a str>>,
    F: AsRef<str> + 'a,
  {
    let vs_stage = Stage::new(ctx, StageType::VertexShader, vertex)?;

    let tess_stages = match tess.into() {
      Some(TessellationStages {
        control,
        evaluation,
      }) => {
        let control_stage = Stage::new(ctx, StageType::TessellationControlShader, control)?;
        let evaluation_stage =
          Stage::new(ctx, StageType::TessellationEvaluationShader, evaluation)?;
        Some((control_stage, evaluation_stage))
      }
      None => None,
    };

    let gs_stage = match geometry.into() {
      Some(geometry) => Some(Stage::new(ctx, StageType::GeometryShader, geometry)?),
      None => None,
    };

    let fs_stage = Stage::new(ctx, StageType::FragmentShader, fragment)?;

    Self::from_stages(
      ctx,
      &vs_stage,
      tess_stages
        .as_ref()
        .map(|(control, evaluation)| TessellationStages {
          control,
          evaluation,
        }),
      gs_stage.as_ref(),
      &fs_stage,
    )
  }

  /// Read stage sources from files, compile them and link them.
  pub fn from_files<'a, C, V, F>(
    ctx: &mut C,
    vertex: V,
    tess: Option<TessellationStages<'a, Path>>,
    geometry: Option<&'a Path>,
    fragment: F,
  ) -> Result<Self, ProgramError>
  where
    C: GraphicsContext<Backend = S>,
    V: AsRef<Path>,
    F: AsRef<Path>,
  {
    let vs_stage = Stage::from_file(ctx, StageType::VertexShader, vertex)?;

    let tess_stages = match tess {
      Some(TessellationStages {
        control,
        evaluation,
      }) => {
        let control_stage = Stage::from_file(ctx, StageType::TessellationControlShader, control)?;
        let evaluation_stage =
          Stage::from_file(ctx, StageType::TessellationEvaluationShader, evaluation)?;
        Some((control_stage, evaluation_stage))
      }
      None => None,
    };

    let gs_stage = match geometry {
      Some(geometry) => Some(Stage::from_file(ctx, StageType::GeometryShader, geometry)?),
      None => None,
    };

    let fs_stage = Stage::from_file(ctx, StageType::FragmentShader, fragment)?;

    Self::from_stages(
      ctx,
      &vs_stage,
      tess_stages
        .as_ref()
        .map(|(control, evaluation)| TessellationStages {
          control,
          evaluation,
        }),
      gs_stage.as_ref(),
      &fs_stage,
    )
  }

  /// Resolve a uniform and upload `value` to it.
  ///
  /// See [`Uniform::new`].
  pub fn uniform<T, N>(&self, name: N, value: T) -> Result<Uniform<'_, S, T>, UniformError>
  where
    S: Uniformable<T>,
    T: Copy,
    N: AsRef<str>,
  {
    Uniform::new(self, name, value)
  }

  /// Resolve a uniform and take a snapshot of its current device value.
  ///
  /// See [`ConstUniform::new`].
  pub fn const_uniform<T, N>(&self, name: N) -> Result<ConstUniform<T>, UniformError>
  where
    S: Uniformable<T>,
    T: Copy,
    N: AsRef<str>,
  {
    ConstUniform::new(self, name)
  }

  /// Resolve a uniform and upload `value` to it, without keeping any accessor around.
  pub fn set<T, N>(&self, name: N, value: T) -> Result<(), UniformError>
  where
    S: Uniformable<T>,
    T: Copy,
    N: AsRef<str>,
  {
    self.uniform(name, value).map(|_| ())
  }

  /// Backend representation of the program.
  pub fn repr(&self) -> &S::ProgramRepr {
    &self.repr
  }
}
