//! The host window server as seen by the reactor.
//!
//! Everything the core needs from the platform goes through [`WindowServer`].
//! Window attributes are queried on demand and never cached by the core,
//! except for the snapshot carried by a creation event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Rect;

#[allow(non_camel_case_types)]
pub type pid_t = i32;

/// An identifier representing a window.
///
/// Stable for the lifetime of the window; never reused while the window
/// manager is running.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl WindowId {
    #[inline]
    pub const fn new(id: u32) -> Self { Self(id) }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attributes of a window as reported by the host at one point in time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowInfo {
    pub pid: pid_t,
    pub title: String,
    pub frame: Rect,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default = "yes")]
    pub is_visible: bool,
    /// Whether the host classifies this as a standard (non-utility) window.
    #[serde(default = "yes")]
    pub is_standard: bool,
}

fn yes() -> bool { true }

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WindowServerError {
    #[error("Window {0} is no longer known to the window server")]
    WindowGone(WindowId),
    #[error("Window server rejected frame {frame:?} for window {wid}")]
    FrameRejected { wid: WindowId, frame: Rect },
    #[error("Accessibility request for pid {pid} failed: {reason}")]
    Accessibility { pid: pid_t, reason: String },
}

/// Capabilities the core consumes from the host.
///
/// Queries on a window the host no longer knows return `None`; side effects
/// on such a window return [`WindowServerError::WindowGone`].
pub trait WindowServer {
    /// All windows currently known to the host, in its enumeration order.
    fn windows(&self) -> Vec<WindowId>;

    fn focused_window(&self) -> Option<WindowId>;

    fn window_info(&self, wid: WindowId) -> Option<WindowInfo>;

    fn frame(&self, wid: WindowId) -> Option<Rect> { self.window_info(wid).map(|w| w.frame) }

    fn set_frame(&mut self, wid: WindowId, frame: Rect) -> Result<(), WindowServerError>;

    fn focus(&mut self, wid: WindowId) -> Result<(), WindowServerError>;

    fn raise(&mut self, wid: WindowId) -> Result<(), WindowServerError>;

    fn close(&mut self, wid: WindowId) -> Result<(), WindowServerError>;

    /// Frame of the active screen.
    fn screen_frame(&self) -> Rect;

    /// Reads the application-level "enhanced user interface" accessibility
    /// flag of `pid`.
    fn enhanced_ui(&self, pid: pid_t) -> Result<bool, WindowServerError>;

    fn set_enhanced_ui(&mut self, pid: pid_t, enabled: bool) -> Result<(), WindowServerError>;
}

impl<S: WindowServer + ?Sized> WindowServer for Box<S> {
    fn windows(&self) -> Vec<WindowId> { (**self).windows() }

    fn focused_window(&self) -> Option<WindowId> { (**self).focused_window() }

    fn window_info(&self, wid: WindowId) -> Option<WindowInfo> { (**self).window_info(wid) }

    fn frame(&self, wid: WindowId) -> Option<Rect> { (**self).frame(wid) }

    fn set_frame(&mut self, wid: WindowId, frame: Rect) -> Result<(), WindowServerError> {
        (**self).set_frame(wid, frame)
    }

    fn focus(&mut self, wid: WindowId) -> Result<(), WindowServerError> { (**self).focus(wid) }

    fn raise(&mut self, wid: WindowId) -> Result<(), WindowServerError> { (**self).raise(wid) }

    fn close(&mut self, wid: WindowId) -> Result<(), WindowServerError> { (**self).close(wid) }

    fn screen_frame(&self) -> Rect { (**self).screen_frame() }

    fn enhanced_ui(&self, pid: pid_t) -> Result<bool, WindowServerError> {
        (**self).enhanced_ui(pid)
    }

    fn set_enhanced_ui(&mut self, pid: pid_t, enabled: bool) -> Result<(), WindowServerError> {
        (**self).set_enhanced_ui(pid, enabled)
    }
}
