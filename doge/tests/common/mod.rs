//! In-memory reference backend.
//!
//! Stages are “compiled” by scanning their sources for `uniform <type> <name>;` declarations;
//! programs store uploaded values per location and count uploads. Types unknown to doge (`bool`,
//! samplers…) are accepted in declarations but never match any requested type.

#![allow(dead_code)]

use doge::backend::shader::{Shader, Uniformable};
use doge::context::GraphicsContext;
use doge::shader::types::{
  IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4,
};
use doge::shader::{
  Program, ProgramError, StageError, StageType, TessellationStages, UniformError,
  UniformLocation, UniformType,
};
use std::any::Any;
use std::cell::{Cell, RefCell};

pub const VS: &str = "
void main() {
  gl_Position = vec4(0., 0., 0., 1.);
}";

/// Every uniform used by the uniform tests, three of each supported type.
pub const UNIFORMS_FS: &str = "
uniform float f.a;
uniform float f.b;
uniform float f.c;

uniform int i.a;
uniform int i.b;
uniform int i.c;

uniform uint u.a;
uniform uint u.b;
uniform uint u.c;

uniform vec2 v2.a;
uniform vec2 v2.b;
uniform vec2 v2.c;
uniform ivec2 iv2.a;
uniform ivec2 iv2.b;
uniform ivec2 iv2.c;
uniform uvec2 uv2.a;
uniform uvec2 uv2.b;
uniform uvec2 uv2.c;

uniform vec3 v3.a;
uniform vec3 v3.b;
uniform vec3 v3.c;
uniform ivec3 iv3.a;
uniform ivec3 iv3.b;
uniform ivec3 iv3.c;
uniform uvec3 uv3.a;
uniform uvec3 uv3.b;
uniform uvec3 uv3.c;

uniform vec4 v4.a;
uniform vec4 v4.b;
uniform vec4 v4.c;
uniform ivec4 iv4.a;
uniform ivec4 iv4.b;
uniform ivec4 iv4.c;
uniform uvec4 uv4.a;
uniform uvec4 uv4.b;
uniform uvec4 uv4.c;

uniform mat2 m2.a;
uniform mat2 m2.b;
uniform mat2 m2.c;
uniform mat3 m3.a;
uniform mat3 m3.b;
uniform mat3 m3.c;
uniform mat4 m4.a;
uniform mat4 m4.b;
uniform mat4 m4.c;

uniform bool bad_type;

out vec4 frag;

void main() {
  frag = vec4(1., 1., 1., 1.);
}";

/// Reference backend type.
#[derive(Debug, Default)]
pub struct Soft;

/// Uniform declarations found in a stage; `None` types are declared with a type doge doesn’t
/// support.
#[derive(Debug)]
pub struct SoftStage {
  decls: Vec<(String, Option<UniformType>)>,
}

#[derive(Debug)]
pub struct SoftProgram {
  decls: Vec<(String, Option<UniformType>)>,
  slots: RefCell<Vec<Option<Box<dyn Any>>>>,
  uploads: Cell<usize>,
}

impl SoftProgram {
  /// Number of uploads performed on this program so far.
  pub fn uploads(&self) -> usize {
    self.uploads.get()
  }
}

#[derive(Debug, Default)]
pub struct SoftContext {
  backend: Soft,
}

unsafe impl GraphicsContext for SoftContext {
  type Backend = Soft;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

/// Build the program declaring all the uniforms of [`UNIFORMS_FS`].
pub fn uniforms_program(ctx: &mut SoftContext) -> Program<Soft> {
  Program::from_strings(ctx, VS, None, None, UNIFORMS_FS).expect("uniforms program")
}

fn scan_declarations(
  ty: StageType,
  src: &str,
) -> Result<Vec<(String, Option<UniformType>)>, StageError> {
  let mut decls = Vec::new();

  for line in src.lines().map(str::trim) {
    let decl = match line.strip_prefix("uniform ") {
      Some(decl) => decl,
      None => continue,
    };

    let decl = decl
      .strip_suffix(';')
      .ok_or_else(|| StageError::compilation_failed(ty, format!("missing `;`: {}", line)))?;
    let mut words = decl.split_whitespace();

    match (words.next(), words.next(), words.next()) {
      (Some(glsl_ty), Some(name), None) => {
        decls.push((name.to_owned(), UniformType::from_glsl(glsl_ty)));
      }

      _ => {
        return Err(StageError::compilation_failed(
          ty,
          format!("malformed uniform declaration: {}", line),
        ))
      }
    }
  }

  Ok(decls)
}

unsafe impl Shader for Soft {
  type StageRepr = SoftStage;

  type ProgramRepr = SoftProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    match ty {
      StageType::TessellationControlShader | StageType::TessellationEvaluationShader => {
        Err(StageError::unsupported_type(ty))
      }

      _ => scan_declarations(ty, src).map(|decls| SoftStage { decls }),
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let mut stages = vec![vertex];
    if let Some(TessellationStages {
      control,
      evaluation,
    }) = tess
    {
      stages.push(control);
      stages.push(evaluation);
    }
    stages.extend(geometry);
    stages.push(fragment);

    let mut decls: Vec<(String, Option<UniformType>)> = Vec::new();
    for (name, ty) in stages.into_iter().flat_map(|stage| stage.decls.iter()) {
      match decls.iter().find(|(n, _)| n == name) {
        Some((_, existing)) if existing != ty => {
          return Err(ProgramError::link_failed(format!(
            "uniform {} declared with different types",
            name
          )));
        }

        Some(_) => (),
        None => decls.push((name.clone(), *ty)),
      }
    }

    let slots = RefCell::new((0..decls.len()).map(|_| None).collect());

    Ok(SoftProgram {
      decls,
      slots,
      uploads: Cell::new(0),
    })
  }

  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<UniformLocation<T>, UniformError>
  where
    Self: Uniformable<T>,
  {
    let index = program
      .decls
      .iter()
      .position(|(n, _)| n == name)
      .ok_or_else(|| UniformError::not_found(name))?;

    let expected = <Self as Uniformable<T>>::ty();
    match program.decls[index].1 {
      Some(ty) if ty == expected => Ok(UniformLocation::new(index as i32)),
      _ => Err(UniformError::type_mismatch(name, expected)),
    }
  }
}

macro_rules! impl_Uniformable {
  ($($t:ty => $uty:ident, $zero:expr);* $(;)?) => {
    $(
      unsafe impl Uniformable<$t> for Soft {
        unsafe fn ty() -> UniformType {
          UniformType::$uty
        }

        unsafe fn update(program: &SoftProgram, location: &UniformLocation<$t>, value: &$t) {
          program.uploads.set(program.uploads.get() + 1);
          program.slots.borrow_mut()[location.index() as usize] = Some(Box::new(*value));
        }

        unsafe fn fetch(program: &SoftProgram, location: &UniformLocation<$t>) -> $t {
          program.slots.borrow()[location.index() as usize]
            .as_ref()
            .and_then(|value| value.downcast_ref::<$t>())
            .copied()
            .unwrap_or($zero)
        }
      }
    )*
  };
}

impl_Uniformable!(
  f32 => Float, 0.;
  i32 => Int, 0;
  u32 => UInt, 0;
  Vec2 => Vec2, Vec2::ZERO;
  Vec3 => Vec3, Vec3::ZERO;
  Vec4 => Vec4, Vec4::ZERO;
  IVec2 => IVec2, IVec2::ZERO;
  IVec3 => IVec3, IVec3::ZERO;
  IVec4 => IVec4, IVec4::ZERO;
  UVec2 => UIVec2, UVec2::ZERO;
  UVec3 => UIVec3, UVec3::ZERO;
  UVec4 => UIVec4, UVec4::ZERO;
  Mat2 => M22, Mat2::ZERO;
  Mat3 => M33, Mat3::ZERO;
  Mat4 => M44, Mat4::ZERO;
);
