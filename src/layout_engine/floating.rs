use serde::{Deserialize, Serialize};

use crate::common::collections::HashMap;
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

/// Windows that are excluded from tiling, keyed by id.
#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct FloatingManager {
    floating_windows: HashMap<WindowId, FloatingWindow>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FloatingWindow {
    pub last_known_frame: Rect,
}

impl FloatingManager {
    pub(crate) fn new() -> Self { Self::default() }

    pub(crate) fn is_floating(&self, window_id: WindowId) -> bool {
        self.floating_windows.contains_key(&window_id)
    }

    pub(crate) fn add_floating(&mut self, window_id: WindowId, frame: Rect) {
        self.floating_windows.insert(window_id, FloatingWindow { last_known_frame: frame });
    }

    /// Returns whether the window was floating.
    pub(crate) fn remove_floating(&mut self, window_id: WindowId) -> bool {
        self.floating_windows.remove(&window_id).is_some()
    }

    /// Remembers `frame` for a floating window. Tiled windows are ignored.
    pub(crate) fn refresh_frame(&mut self, window_id: WindowId, frame: Rect) {
        if let Some(floating) = self.floating_windows.get_mut(&window_id) {
            floating.last_known_frame = frame;
        }
    }

    pub(crate) fn get(&self, window_id: WindowId) -> Option<&FloatingWindow> {
        self.floating_windows.get(&window_id)
    }

    /// Floating windows in ascending id order.
    pub(crate) fn windows(&self) -> Vec<WindowId> {
        let mut windows: Vec<_> = self.floating_windows.keys().copied().collect();
        windows.sort_unstable();
        windows
    }
}
