//! [GLFW](https://crates.io/crates/glfw) backend for [doge](https://crates.io/crates/doge).

#![deny(missing_docs)]

use doge::context::GraphicsContext;
pub use doge_gl::gl33::StateQueryError;
use doge_gl::GL33;
use doge_windowing::{CursorMode, WindowDim, WindowOpt};
use glfw::{self, Context as _, Glfw, InitError, Window, WindowEvent, WindowMode};
use std::{convert::Infallible, error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError<E> {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window couldn’t be created, or no monitor was found for fullscreen dimensions.
  WindowCreationFailed,

  /// User error.
  UserError(E),

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl<E> fmt::Display for GlfwSurfaceError<E>
where
  E: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::UserError(ref e) => write!(f, "user error: {}", e),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl<E> From<InitError> for GlfwSurfaceError<E> {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl<E> error::Error for GlfwSurfaceError<E>
where
  E: 'static + error::Error,
{
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::UserError(e) => Some(e),
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you can
/// use to poll events and the [`GL33Context`], which gives access to the doge backend.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped doge context.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Initialize GLFW to provide a doge environment, letting the caller create the window.
  ///
  /// The OpenGL core profile 3.3 hints are set before `create_window` is called. The created window
  /// must be made current by `create_window`.
  pub fn new<E>(
    create_window: impl FnOnce(
      &mut Glfw,
    )
      -> Result<(Window, Receiver<(f64, WindowEvent)>), GlfwSurfaceError<E>>,
  ) -> Result<Self, GlfwSurfaceError<E>> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));

    let (mut window, events_rx) = create_window(&mut glfw)?;

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new().map_err(GlfwSurfaceError::GraphicsStateError)?;
    let context = GL33Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    Ok(surface)
  }

  /// Create a window with an OpenGL 3.3 context and a [`GL33`] backend.
  pub fn new_gl33(title: &str, win_opt: WindowOpt) -> Result<Self, GlfwSurfaceError<Infallible>> {
    GlfwSurface::new(|glfw| {
      glfw.window_hint(glfw::WindowHint::Samples(win_opt.num_samples()));

      let created = match *win_opt.dim() {
        WindowDim::Windowed { width, height } => {
          glfw.create_window(width, height, title, WindowMode::Windowed)
        }

        WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
          let monitor = monitor?;
          let vmode = monitor.get_video_mode()?;
          glfw.create_window(
            vmode.width,
            vmode.height,
            title,
            WindowMode::FullScreen(monitor),
          )
        }),

        WindowDim::FullscreenRestricted { width, height } => {
          glfw.with_primary_monitor(|glfw, monitor| {
            let monitor = monitor?;
            glfw.create_window(width, height, title, WindowMode::FullScreen(monitor))
          })
        }
      };

      let (mut window, events_rx) = created.ok_or(GlfwSurfaceError::WindowCreationFailed)?;
      log::debug!("created window {:?} ({:?})", title, win_opt.dim());

      window.make_current();

      match win_opt.cursor_mode() {
        CursorMode::Visible => window.set_cursor_mode(glfw::CursorMode::Normal),
        CursorMode::Invisible => window.set_cursor_mode(glfw::CursorMode::Hidden),
        CursorMode::Disabled => window.set_cursor_mode(glfw::CursorMode::Disabled),
      }

      window.set_all_polling(true);
      glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

      Ok((window, events_rx))
    })
  }
}

/// doge OpenGL 3.3 context.
///
/// This type also re-exports the GLFW window, if you need access to it.
#[derive(Debug)]
pub struct GL33Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 3.3 state.
  gl: GL33,
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}
