use tracing::{debug, trace};

use crate::actor::reactor::{FocusTarget, Reactor};
use crate::layout_engine::{WorkspaceId, compute_frames, is_manageable};
use crate::sys::geometry::{Rect, SameAs};
use crate::sys::window_server::{WindowId, WindowInfo, WindowServer};

/// Where a newly seen window ended up in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Ignored,
    Floating,
    Tiled(WorkspaceId),
}

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle_window_created<S: WindowServer>(
        reactor: &mut Reactor<S>,
        wid: WindowId,
        window: WindowInfo,
    ) {
        let Placement::Tiled(target) = Self::place_window(reactor, wid, &window) else {
            return;
        };
        if Some(target) == reactor.layout_engine.active_workspace() {
            reactor.show(target, FocusTarget::Window(wid));
        } else {
            reactor.hide_window(wid);
        }
    }

    /// Adopts a window that existed before startup. Only windows bound for
    /// an inactive workspace are touched here; the caller shows the active
    /// workspace once every window is placed.
    pub fn discover_window<S: WindowServer>(
        reactor: &mut Reactor<S>,
        wid: WindowId,
        window: WindowInfo,
    ) {
        if let Placement::Tiled(target) = Self::place_window(reactor, wid, &window)
            && Some(target) != reactor.layout_engine.active_workspace()
        {
            reactor.hide_window(wid);
        }
    }

    fn place_window<S: WindowServer>(
        reactor: &mut Reactor<S>,
        wid: WindowId,
        window: &WindowInfo,
    ) -> Placement {
        if !is_manageable(window) {
            trace!(?wid, "Ignoring unmanageable window");
            return Placement::Ignored;
        }
        if reactor.layout_engine.is_tracked(wid) {
            debug!(?wid, "Window already tracked; ignoring duplicate creation");
            return Placement::Ignored;
        }
        if reactor.layout_engine.rules().is_float_by_default(window) {
            debug!(?wid, title = %window.title, "Floating window by rule");
            reactor.layout_engine.add_floating(wid, window.frame);
            return Placement::Floating;
        }

        let default_workspace =
            reactor.layout_engine.rules().default_workspace_of(window).map(str::to_string);
        let target = match default_workspace {
            Some(name) => reactor.layout_engine.workspace_or_create(&name),
            None => match reactor.layout_engine.active_workspace() {
                Some(active) => active,
                None => return Placement::Ignored,
            },
        };
        debug!(?wid, workspace = %reactor.layout_engine.workspace(target).name, "Tiling window");
        reactor.layout_engine.layout_mut(target).insert(wid);
        Placement::Tiled(target)
    }

    pub fn handle_window_destroyed<S: WindowServer>(reactor: &mut Reactor<S>, wid: WindowId) {
        if reactor.layout_engine.remove_floating(wid) {
            debug!(?wid, "Floating window destroyed");
            return;
        }
        let Some(owner) = reactor.layout_engine.workspace_of(wid) else {
            trace!(?wid, "Destroyed window was not tracked");
            return;
        };
        let refocus = reactor.layout_engine.layout_mut(owner).remove(wid);
        if Some(owner) == reactor.layout_engine.active_workspace() {
            reactor.show(owner, refocus.into());
        }
    }

    pub fn handle_window_moved<S: WindowServer>(
        reactor: &mut Reactor<S>,
        wid: WindowId,
        frame: Rect,
    ) {
        let Some(window) = reactor.server.window_info(wid) else {
            trace!(?wid, "Moved window is gone");
            return;
        };
        if !is_manageable(&window) {
            return;
        }
        if reactor.layout_engine.is_floating(wid) {
            reactor.layout_engine.refresh_floating_frame(wid, frame);
            return;
        }
        let Some(active) = reactor.layout_engine.active_workspace() else {
            return;
        };
        let layout = reactor.layout_engine.layout(active);
        if !layout.contains(wid) {
            return;
        }

        // Our own frame writes come back as move notifications. Only a
        // workspace that is entirely on its grid can skip the redisplay.
        let frames = compute_frames(
            layout,
            reactor.server.screen_frame(),
            reactor.settings.margin,
            reactor.settings.enlarge_ratio,
        );
        let on_grid = frames.iter().all(|&(w, expected)| {
            let current = if w == wid { Some(frame) } else { reactor.server.frame(w) };
            current.is_some_and(|current| current.same_as(expected))
        });
        if on_grid {
            trace!(?wid, "Workspace already on its grid");
            return;
        }

        debug!(?wid, ?frame, "Snapping tiled window back into place");
        reactor.show(active, FocusTarget::Unchanged);
    }

    pub fn handle_window_focused<S: WindowServer>(reactor: &mut Reactor<S>, wid: WindowId) {
        let Some(window) = reactor.server.window_info(wid) else {
            trace!(?wid, "Focused window is gone");
            return;
        };
        if !is_manageable(&window) {
            return;
        }
        if reactor.layout_engine.active_position_of(wid).is_some()
            || reactor.layout_engine.is_floating(wid)
        {
            return;
        }
        let Some(owner) = reactor.layout_engine.workspace_of(wid) else {
            trace!(?wid, "Focused window is not tracked");
            return;
        };
        debug!(?wid, "Focus moved to another workspace; following it");
        reactor.switch_workspace(owner, FocusTarget::Window(wid));
    }
}
