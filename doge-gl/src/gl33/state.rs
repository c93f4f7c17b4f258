//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing costy GPU commands if we know the target value is
/// already set to what the command tries to set. For instance, if you ask to use the program `34`
/// once, that value will be set on the GPU and cached on our side. Later, if no other program
/// has been used in between, asking to use the program `34` again doesn’t perform anything
/// GPU-wise.
#[derive(Debug)]
struct Cached<T>(Option<T>)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  /// Cache a value.
  fn new(initial: T) -> Self {
    Cached(Some(initial))
  }

  /// Explicitly invalidate a value.
  ///
  /// This is necessary when we want to be able to force a GPU command to run.
  fn invalidate(&mut self) {
    self.0 = None;
  }

  fn set(&mut self, value: T) {
    self.0 = Some(value);
  }

  /// Check if the cached value is invalid regarding a value.
  ///
  /// A non-cached value (i.e. empty) is always invalid whatever compared value. If a value is
  /// already cached, then it’s invalid if it’s not equal ([`PartialEq`]) to the input value.
  fn is_invalid(&self, new_val: &T) -> bool {
    match &self.0 {
      Some(ref t) => t != new_val,
      _ => true,
    }
  }
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. doge only cares about the
/// program in use: uploading a uniform value requires its program to be bound, and the cache
/// prevents rebinding it on every upload.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // shader program
  current_program: Cached<GLuint>,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let current_program = Cached::new(get_ctx_current_program()?);

      Ok(GLState {
        _a: PhantomData,
        current_program,
      })
    }
  }

  /// Invalidate the currently in-use shader program.
  pub fn invalidate_shader_program(&mut self) {
    self.current_program.invalidate();
  }

  /// Forget about a program which is about to be deleted, so that a later program reusing its
  /// handle gets bound.
  pub(crate) fn forget_program(&mut self, handle: GLuint) {
    if !self.current_program.is_invalid(&handle) {
      self.current_program.invalidate();
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program.is_invalid(&handle) {
      log::trace!("binding program {}", handle);
      gl::UseProgram(handle);
      self.current_program.set(handle);
    }
  }
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// The currently bound program handle is not a valid handle.
  UnknownShaderProgram(GLint),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnknownShaderProgram(ref p) => write!(f, "unknown shader program: {}", p),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_current_program() -> Result<GLuint, StateQueryError> {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);

  if used < 0 {
    Err(StateQueryError::UnknownShaderProgram(used))
  } else {
    Ok(used as GLuint)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_invalidation() {
    let mut program = Cached::new(3);
    assert!(!program.is_invalid(&3));
    assert!(program.is_invalid(&4));

    program.set(4);
    assert!(!program.is_invalid(&4));

    program.invalidate();
    assert!(program.is_invalid(&4));
    assert!(program.is_invalid(&0));
  }

  #[test]
  fn state_query_error_display() {
    assert_eq!(
      StateQueryError::UnavailableGLState.to_string(),
      "unavailable graphics state"
    );
    assert_eq!(
      StateQueryError::UnknownShaderProgram(-1).to_string(),
      "unknown shader program: -1"
    );
  }
}
