use crate::gl33::state::GLState;
use crate::gl33::GL33;
use doge::backend::shader::{Shader, Uniformable};
use doge::shader::types::{
  IVec2, IVec3, IVec4, Mat2, Mat3, Mat4, UVec2, UVec3, UVec4, Vec2, Vec3, Vec4,
};
use doge::shader::{
  ProgramError, StageError, StageType, TessellationStages, UniformError, UniformLocation,
  UniformType,
};
use gl::{self, types::*};
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::{null, null_mut};
use std::rc::Rc;

/// A compiled OpenGL shader stage.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

/// A linked OpenGL shader program.
#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteProgram(self.handle);
    }

    self.state.borrow_mut().forget_program(self.handle);
  }
}

impl Program {
  /// OpenGL handle of the program.
  pub fn handle(&self) -> GLuint {
    self.handle
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked = GLint::from(gl::FALSE);
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == GLint::from(gl::TRUE) {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
        gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        let log = info_log(log);
        log::warn!("program {} failed to link: {}", handle, log);

        Err(ProgramError::link_failed(log))
      }
    }
  }

  // bind the program so that glUniform* calls target it
  unsafe fn bind(&self) {
    self.state.borrow_mut().use_program(self.handle);
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(glsl_pragma_src(src))
      .map_err(|_| StageError::compilation_failed(ty, "source contains a NUL byte"))?;

    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::compilation_failed(
        ty,
        "unable to create shader stage",
      ));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled = GLint::from(gl::FALSE);
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == GLint::from(gl::TRUE) {
      Ok(Stage { handle })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

      gl::DeleteShader(handle);

      let log = info_log(log);
      log::warn!("{} failed to compile: {}", ty, log);

      Err(StageError::compilation_failed(ty, log))
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    tess: Option<TessellationStages<Self::StageRepr>>,
    geometry: Option<&Self::StageRepr>,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if let Some(TessellationStages {
      control,
      evaluation,
    }) = tess
    {
      gl::AttachShader(handle, control.handle);
      gl::AttachShader(handle, evaluation.handle);
    }

    gl::AttachShader(handle, vertex.handle);

    if let Some(geometry) = geometry {
      gl::AttachShader(handle, geometry.handle);
    }

    gl::AttachShader(handle, fragment.handle);

    let program = Program {
      handle,
      state: self.state.clone(),
    };
    program.link().map(move |_| program)
  }

  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<UniformLocation<T>, UniformError>
  where
    Self: Uniformable<T>,
  {
    // a name with an interior NUL cannot name anything in GLSL
    let c_name = CString::new(name.as_bytes()).map_err(|_| UniformError::not_found(name))?;
    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    // ensure the location smells good
    if location < 0 {
      log::debug!("uniform {} is not active in program {}", name, program.handle);
      return Err(UniformError::not_found(name));
    }

    // ensure the type is correct regarding what we have in the type-system
    uniform_type_match(program.handle, name, &c_name, <Self as Uniformable<T>>::ty())?;

    Ok(UniformLocation::new(location))
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::TessellationControlShader => gl::TESS_CONTROL_SHADER,
    StageType::TessellationEvaluationShader => gl::TESS_EVALUATION_SHADER,
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::GeometryShader => gl::GEOMETRY_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

const GLSL_PRAGMA: &str = "#version 330 core\n\
                           #extension GL_ARB_separate_shader_objects : require\n";

fn glsl_pragma_src(src: &str) -> String {
  let mut pragma = String::from(GLSL_PRAGMA);
  pragma.push_str(src);
  pragma
}

// info logs are NUL-terminated and not guaranteed to be valid UTF-8
fn info_log(mut log: Vec<u8>) -> String {
  if let Some(nul) = log.iter().position(|&b| b == 0) {
    log.truncate(nul);
  }

  String::from_utf8_lossy(&log).trim_end().to_owned()
}

fn uniform_type_match(
  program: GLuint,
  name: &str,
  c_name: &CString,
  ty: UniformType,
) -> Result<(), UniformError> {
  let mut glty: GLuint = 0;
  let mut found_size: GLint = 0;

  unsafe {
    // get the max length of the returned names
    let mut max_len = 0;
    gl::GetProgramiv(program, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_len);

    // get the index of the uniform
    let mut index = gl::INVALID_INDEX;
    gl::GetUniformIndices(
      program,
      1,
      [c_name.as_ptr() as *const GLchar].as_ptr(),
      &mut index,
    );

    if index == gl::INVALID_INDEX {
      log::debug!("uniform {} has no index in program {}", name, program);
      return Err(UniformError::not_found(name));
    }

    // get its size and type
    let mut name_ = vec![0 as GLchar; max_len.max(1) as usize];
    gl::GetActiveUniform(
      program,
      index,
      max_len.max(1),
      null_mut(),
      &mut found_size,
      &mut glty,
      name_.as_mut_ptr(),
    );
  }

  check_uniform_type_match(name, ty, glty)
}

fn check_uniform_type_match(
  name: &str,
  ty: UniformType,
  glty: GLuint,
) -> Result<(), UniformError> {
  // helper macro to check type mismatch for each variant
  macro_rules! milkcheck {
    ($ty:expr, $( ( $v:tt, $t:tt ) ),* $(,)?) => {
      match $ty {
        $(
          UniformType::$v => {
            if glty == gl::$t {
              Ok(())
            } else {
              log::debug!("uniform {} is not a {} (GL type {:#x})", name, ty, glty);
              Err(UniformError::type_mismatch(name, ty))
            }
          }
        )*
      }
    }
  }

  milkcheck!(
    ty,
    // scalars
    (Int, INT),
    (UInt, UNSIGNED_INT),
    (Float, FLOAT),
    // vectors
    (IVec2, INT_VEC2),
    (IVec3, INT_VEC3),
    (IVec4, INT_VEC4),
    (UIVec2, UNSIGNED_INT_VEC2),
    (UIVec3, UNSIGNED_INT_VEC3),
    (UIVec4, UNSIGNED_INT_VEC4),
    (Vec2, FLOAT_VEC2),
    (Vec3, FLOAT_VEC3),
    (Vec4, FLOAT_VEC4),
    // matrices
    (M22, FLOAT_MAT2),
    (M33, FLOAT_MAT3),
    (M44, FLOAT_MAT4),
  )
}

macro_rules! impl_Uniformable {
  (vec $t:ty, $elem:ty, $n:literal, $uty:tt, $f:tt, $get:tt) => {
    unsafe impl Uniformable<$t> for GL33 {
      unsafe fn ty() -> UniformType {
        UniformType::$uty
      }

      unsafe fn update(program: &Program, location: &UniformLocation<$t>, value: &$t) {
        program.bind();
        gl::$f(location.index(), 1, value.to_array().as_ptr());
      }

      unsafe fn fetch(program: &Program, location: &UniformLocation<$t>) -> $t {
        let mut data: [$elem; $n] = [Default::default(); $n];
        gl::$get(program.handle, location.index(), data.as_mut_ptr());
        <$t>::from_array(data)
      }
    }
  };

  // matrix notation
  (mat $t:ty, $n:literal, $uty:tt, $f:tt) => {
    /// Matrices are uploaded in column-major order, without transposition. Upload
    /// `m.transpose()` to send a row-major matrix.
    unsafe impl Uniformable<$t> for GL33 {
      unsafe fn ty() -> UniformType {
        UniformType::$uty
      }

      unsafe fn update(program: &Program, location: &UniformLocation<$t>, value: &$t) {
        program.bind();
        gl::$f(location.index(), 1, gl::FALSE, value.to_cols_array().as_ptr());
      }

      unsafe fn fetch(program: &Program, location: &UniformLocation<$t>) -> $t {
        let mut data = [0.; $n];
        gl::GetUniformfv(program.handle, location.index(), data.as_mut_ptr());
        <$t>::from_cols_array(&data)
      }
    }
  };

  ($t:ty, $uty:tt, $f:tt, $get:tt) => {
    unsafe impl Uniformable<$t> for GL33 {
      unsafe fn ty() -> UniformType {
        UniformType::$uty
      }

      unsafe fn update(program: &Program, location: &UniformLocation<$t>, value: &$t) {
        program.bind();
        gl::$f(location.index(), *value);
      }

      unsafe fn fetch(program: &Program, location: &UniformLocation<$t>) -> $t {
        let mut value: $t = Default::default();
        gl::$get(program.handle, location.index(), &mut value);
        value
      }
    }
  };
}

impl_Uniformable!(i32, Int, Uniform1i, GetUniformiv);
impl_Uniformable!(vec IVec2, i32, 2, IVec2, Uniform2iv, GetUniformiv);
impl_Uniformable!(vec IVec3, i32, 3, IVec3, Uniform3iv, GetUniformiv);
impl_Uniformable!(vec IVec4, i32, 4, IVec4, Uniform4iv, GetUniformiv);

impl_Uniformable!(u32, UInt, Uniform1ui, GetUniformuiv);
impl_Uniformable!(vec UVec2, u32, 2, UIVec2, Uniform2uiv, GetUniformuiv);
impl_Uniformable!(vec UVec3, u32, 3, UIVec3, Uniform3uiv, GetUniformuiv);
impl_Uniformable!(vec UVec4, u32, 4, UIVec4, Uniform4uiv, GetUniformuiv);

impl_Uniformable!(f32, Float, Uniform1f, GetUniformfv);
impl_Uniformable!(vec Vec2, f32, 2, Vec2, Uniform2fv, GetUniformfv);
impl_Uniformable!(vec Vec3, f32, 3, Vec3, Uniform3fv, GetUniformfv);
impl_Uniformable!(vec Vec4, f32, 4, Vec4, Uniform4fv, GetUniformfv);

impl_Uniformable!(mat Mat2, 4, M22, UniformMatrix2fv);
impl_Uniformable!(mat Mat3, 9, M33, UniformMatrix3fv);
impl_Uniformable!(mat Mat4, 16, M44, UniformMatrix4fv);
