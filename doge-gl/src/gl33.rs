//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for doge. The backend type is [`GL33`].

mod shader;
mod state;

pub use self::shader::{Program, Stage};
pub use self::state::{GLState, StateQueryError};
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a doge backend type. It implements the whole backend interface.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// An OpenGL 3.3 context must be current on the calling thread and its symbols loaded. Only one
  /// backend can exist per thread; creating a second one fails with
  /// [`StateQueryError::UnavailableGLState`].
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Internal access to the backend state.
  ///
  /// # Safety
  ///
  /// This method exposes the internals of the backend. Changing the bound program behind its back
  /// must be followed by [`GLState::invalidate_shader_program`].
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }
}
