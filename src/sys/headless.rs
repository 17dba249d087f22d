//! An in-memory window server.
//!
//! Used by the test suites and by event replay, where no real host is
//! available. Every side effect the reactor asks for is recorded as a
//! [`Request`] so callers can assert on exactly what would have reached the
//! screen.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::window_server::{WindowId, WindowInfo, WindowServer, WindowServerError, pid_t};
use crate::common::collections::{HashMap, HashSet};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Request {
    SetFrame(WindowId, Rect),
    Focus(WindowId),
    Raise(WindowId),
    Close(WindowId),
    SetEnhancedUi(pid_t, bool),
}

#[derive(Debug, Clone)]
pub struct HeadlessWindowServer {
    screen: Rect,
    windows: Vec<(WindowId, WindowInfo)>,
    focused: Option<WindowId>,
    enhanced_ui: HashMap<pid_t, bool>,
    rejected_frames: HashSet<WindowId>,
    inaccessible_apps: HashSet<pid_t>,
    requests: Vec<Request>,
}

impl HeadlessWindowServer {
    pub fn new(screen: Rect) -> Self {
        Self {
            screen,
            windows: Vec::new(),
            focused: None,
            enhanced_ui: HashMap::default(),
            rejected_frames: HashSet::default(),
            inaccessible_apps: HashSet::default(),
            requests: Vec::new(),
        }
    }

    fn entry_mut(&mut self, wid: WindowId) -> Option<&mut WindowInfo> {
        self.windows.iter_mut().find(|(id, _)| *id == wid).map(|(_, info)| info)
    }

    /// Registers a window. Re-adding a known id replaces its attributes.
    pub fn add_window(&mut self, wid: WindowId, info: WindowInfo) {
        match self.entry_mut(wid) {
            Some(existing) => *existing = info,
            None => self.windows.push((wid, info)),
        }
    }

    pub fn remove_window(&mut self, wid: WindowId) -> Option<WindowInfo> {
        let idx = self.windows.iter().position(|(id, _)| *id == wid)?;
        if self.focused == Some(wid) {
            self.focused = None;
        }
        Some(self.windows.remove(idx).1)
    }

    /// Moves a window as the user would, without recording a request.
    pub fn move_window(&mut self, wid: WindowId, frame: Rect) {
        if let Some(info) = self.entry_mut(wid) {
            info.frame = frame;
        }
    }

    /// Changes focus as the user would, without recording a request.
    pub fn set_focused(&mut self, wid: Option<WindowId>) { self.focused = wid; }

    pub fn set_app_enhanced_ui(&mut self, pid: pid_t, enabled: bool) {
        self.enhanced_ui.insert(pid, enabled);
    }

    /// Makes every later frame write for `wid` fail.
    pub fn reject_frames_for(&mut self, wid: WindowId) { self.rejected_frames.insert(wid); }

    /// Makes every accessibility flag read or write for `pid` fail.
    pub fn deny_accessibility_for(&mut self, pid: pid_t) { self.inaccessible_apps.insert(pid); }

    pub fn requests(&self) -> &[Request] { &self.requests }

    pub fn take_requests(&mut self) -> Vec<Request> { std::mem::take(&mut self.requests) }
}

impl WindowServer for HeadlessWindowServer {
    fn windows(&self) -> Vec<WindowId> { self.windows.iter().map(|(id, _)| *id).collect() }

    fn focused_window(&self) -> Option<WindowId> { self.focused }

    fn window_info(&self, wid: WindowId) -> Option<WindowInfo> {
        self.windows.iter().find(|(id, _)| *id == wid).map(|(_, info)| info.clone())
    }

    fn set_frame(&mut self, wid: WindowId, frame: Rect) -> Result<(), WindowServerError> {
        if self.rejected_frames.contains(&wid) {
            return Err(WindowServerError::FrameRejected { wid, frame });
        }
        let info = self.entry_mut(wid).ok_or(WindowServerError::WindowGone(wid))?;
        info.frame = frame;
        self.requests.push(Request::SetFrame(wid, frame));
        Ok(())
    }

    fn focus(&mut self, wid: WindowId) -> Result<(), WindowServerError> {
        if self.entry_mut(wid).is_none() {
            return Err(WindowServerError::WindowGone(wid));
        }
        self.focused = Some(wid);
        self.requests.push(Request::Focus(wid));
        Ok(())
    }

    fn raise(&mut self, wid: WindowId) -> Result<(), WindowServerError> {
        if self.entry_mut(wid).is_none() {
            return Err(WindowServerError::WindowGone(wid));
        }
        self.requests.push(Request::Raise(wid));
        Ok(())
    }

    fn close(&mut self, wid: WindowId) -> Result<(), WindowServerError> {
        if self.entry_mut(wid).is_none() {
            return Err(WindowServerError::WindowGone(wid));
        }
        self.requests.push(Request::Close(wid));
        Ok(())
    }

    fn screen_frame(&self) -> Rect { self.screen }

    fn enhanced_ui(&self, pid: pid_t) -> Result<bool, WindowServerError> {
        if self.inaccessible_apps.contains(&pid) {
            return Err(WindowServerError::Accessibility { pid, reason: "access denied".into() });
        }
        Ok(self.enhanced_ui.get(&pid).copied().unwrap_or(false))
    }

    fn set_enhanced_ui(&mut self, pid: pid_t, enabled: bool) -> Result<(), WindowServerError> {
        if self.inaccessible_apps.contains(&pid) {
            return Err(WindowServerError::Accessibility { pid, reason: "access denied".into() });
        }
        self.enhanced_ui.insert(pid, enabled);
        self.requests.push(Request::SetEnhancedUi(pid, enabled));
        Ok(())
    }
}
