//! # doge windowing
//!
//! Common windowing types for doge. The `doge` crate talks to shader programs but doesn’t create
//! the OpenGL context they live in; windowing crates (such as `doge-glfw`) do, and they are
//! configured with the types of this crate:
//!
//! - [`WindowDim`]: dimension of a window and its mode (windowed, fullscreen, fullscreen
//!   restricted).
//! - [`WindowOpt`]: hints to customize the window, such as whether the cursor should be hidden or
//!   how many samples to use for multisampling.

#![deny(missing_docs)]

/// Dimension metrics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode (adapt to your screen).
  Fullscreen,
  /// Fullscreen mode with restricted viewport dimension.
  FullscreenRestricted {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
}

impl WindowDim {
  /// Ratio of the width over the height, if the dimension is known ahead of time.
  ///
  /// [`WindowDim::Fullscreen`] depends on the monitor and yields `None`. A zero height yields
  /// `None` too.
  pub fn aspect_ratio(&self) -> Option<f32> {
    match *self {
      WindowDim::Windowed { width, height } | WindowDim::FullscreenRestricted { width, height }
        if height != 0 =>
      {
        Some(width as f32 / height as f32)
      }

      _ => None,
    }
  }
}

/// Cursor mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorMode {
  /// The cursor is always visible.
  Visible,
  /// The cursor exists yet has been disabled.
  Invisible,
  /// The cursor is disabled.
  Disabled,
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  cursor_mode: CursorMode,
  num_samples: Option<u32>,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::Windowed { width: 960, height: 540 }`.
  /// - `cursor_mode` set to `CursorMode::Visible`.
  /// - `num_samples` set to `None`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 960,
        height: 540,
      },
      cursor_mode: CursorMode::Visible,
      num_samples: None,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> &WindowDim {
    &self.dim
  }

  /// Hide, unhide or disable the cursor. Default to `CursorMode::Visible`.
  #[inline]
  pub fn set_cursor_mode(self, mode: CursorMode) -> Self {
    WindowOpt {
      cursor_mode: mode,
      ..self
    }
  }

  /// Get the cursor mode.
  #[inline]
  pub fn cursor_mode(&self) -> CursorMode {
    self.cursor_mode
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aspect_ratio() {
    let dim = WindowDim::Windowed {
      width: 960,
      height: 540,
    };
    assert_eq!(dim.aspect_ratio(), Some(960. / 540.));

    let dim = WindowDim::FullscreenRestricted {
      width: 800,
      height: 800,
    };
    assert_eq!(dim.aspect_ratio(), Some(1.));

    assert_eq!(WindowDim::Fullscreen.aspect_ratio(), None);
    assert_eq!(
      WindowDim::Windowed {
        width: 1,
        height: 0
      }
      .aspect_ratio(),
      None
    );
  }

  #[test]
  fn window_opt_builders() {
    let opt = WindowOpt::default();
    assert_eq!(opt.cursor_mode(), CursorMode::Visible);
    assert_eq!(opt.num_samples(), None);
    assert_eq!(
      opt.dim(),
      &WindowDim::Windowed {
        width: 960,
        height: 540
      }
    );

    let opt = opt
      .set_dim(WindowDim::Fullscreen)
      .set_cursor_mode(CursorMode::Disabled)
      .set_num_samples(4);
    assert_eq!(opt.dim(), &WindowDim::Fullscreen);
    assert_eq!(opt.cursor_mode(), CursorMode::Disabled);
    assert_eq!(opt.num_samples(), Some(4));

    assert_eq!(opt.set_num_samples(None).num_samples(), None);
  }
}
