use tracing::{debug, trace, warn};

use super::Reactor;
use crate::layout_engine::{WorkspaceId, compute_frames, hidden_frame};
use crate::sys::enhanced_ui::with_enhanced_ui_disabled;
use crate::sys::geometry::Rect;
use crate::sys::window_server::{WindowId, WindowServer};

/// Which window should hold focus once a workspace has been laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Unchanged,
    Main,
    Window(WindowId),
}

impl From<Option<WindowId>> for FocusTarget {
    fn from(wid: Option<WindowId>) -> Self {
        match wid {
            Some(wid) => FocusTarget::Window(wid),
            None => FocusTarget::Unchanged,
        }
    }
}

impl<S: WindowServer> Reactor<S> {
    /// Writes each frame, continuing past windows the host refuses or no
    /// longer knows.
    pub(crate) fn apply_frames(&mut self, frames: &[(WindowId, Rect)]) {
        for &(wid, frame) in frames {
            let Some(info) = self.server.window_info(wid) else {
                debug!(?wid, "Skipping frame for vanished window");
                continue;
            };
            let result =
                with_enhanced_ui_disabled(&mut self.server, info.pid, |s| s.set_frame(wid, frame));
            if let Err(err) = result {
                warn!(?wid, "Could not place window: {err}");
            }
        }
    }

    /// Parks `wid` off screen, keeping its size.
    pub(crate) fn hide_window(&mut self, wid: WindowId) {
        let Some(current) = self.server.frame(wid) else {
            debug!(?wid, "Not hiding vanished window");
            return;
        };
        let screen = self.server.screen_frame();
        let Some(target) = hidden_frame(current, screen, self.settings.hide_corner) else {
            trace!(?wid, "Window has no size; leaving it in place");
            return;
        };
        self.apply_frames(&[(wid, target)]);
    }

    pub(crate) fn hide_workspace(&mut self, ws: WorkspaceId) {
        let windows: Vec<_> = self.layout_engine.layout(ws).windows().collect();
        for wid in windows {
            self.hide_window(wid);
        }
    }

    /// Reports the active workspace to the indicator, lays out every window
    /// of `ws`, moves focus, then raises floating windows above the tiles.
    pub(crate) fn show(&mut self, ws: WorkspaceId, focus: FocusTarget) {
        self.update_indicator();
        let layout = self.layout_engine.layout(ws);
        let Some(main) = layout.main() else {
            trace!("Nothing to show");
            return;
        };
        let frames = compute_frames(
            layout,
            self.server.screen_frame(),
            self.settings.margin,
            self.settings.enlarge_ratio,
        );
        self.apply_frames(&frames);

        let focus = match focus {
            FocusTarget::Unchanged => None,
            FocusTarget::Main => Some(main),
            FocusTarget::Window(wid) => Some(wid),
        };
        if let Some(wid) = focus
            && let Err(err) = self.server.focus(wid)
        {
            warn!(?wid, "Could not focus window: {err}");
        }

        for wid in self.layout_engine.floating_windows() {
            if let Err(err) = self.server.raise(wid) {
                debug!(?wid, "Could not raise floating window: {err}");
            }
        }
    }
}
