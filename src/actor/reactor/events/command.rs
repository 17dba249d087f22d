use tracing::{debug, info, warn};

use crate::actor::reactor::{Command, FocusTarget, Reactor};
use crate::actor::switcher;
use crate::layout_engine::{Direction, WorkspaceId};
use crate::sys::window_server::{WindowId, WindowServer};

pub struct CommandEventHandler;

impl CommandEventHandler {
    pub fn handle_command<S: WindowServer>(reactor: &mut Reactor<S>, cmd: Command) {
        info!(?cmd);
        match cmd {
            Command::SwitchToWorkspace(name) => Self::handle_switch_to_workspace(reactor, &name),
            Command::SendToWorkspace(name) => Self::handle_send_to_workspace(reactor, &name),
            Command::NextWorkspace => Self::handle_neighbor_workspace(reactor, 1),
            Command::PrevWorkspace => Self::handle_neighbor_workspace(reactor, -1),
            Command::MoveFocus(direction) => Self::handle_move_focus(reactor, direction),
            Command::MoveWindow(direction) => Self::handle_move_window(reactor, direction),
            Command::ToggleEnlarge => Self::handle_toggle_enlarge(reactor),
            Command::ToggleFloat => Self::handle_toggle_float(reactor),
            Command::CloseWindow => Self::handle_close_window(reactor),
            Command::SwitcherNext => Self::handle_switcher(reactor, 1),
            Command::SwitcherPrevious => Self::handle_switcher(reactor, -1),
        }
    }

    fn handle_switch_to_workspace<S: WindowServer>(reactor: &mut Reactor<S>, name: &str) {
        if reactor.active_workspace_name() == Some(name) {
            debug!(name, "Already on workspace");
            return;
        }
        let target = reactor.layout_engine.workspace_or_create(name);
        reactor.switch_workspace(target, FocusTarget::Main);
    }

    fn handle_neighbor_workspace<S: WindowServer>(reactor: &mut Reactor<S>, step: isize) {
        let Some(target) = reactor.layout_engine.neighbor_workspace(step) else {
            return;
        };
        let name = reactor.layout_engine.workspace(target).name.clone();
        Self::handle_switch_to_workspace(reactor, &name);
    }

    fn handle_send_to_workspace<S: WindowServer>(reactor: &mut Reactor<S>, name: &str) {
        let Some(wid) = reactor.server.focused_window() else {
            debug!("No focused window to send");
            return;
        };
        if reactor.layout_engine.is_floating(wid) || reactor.active_workspace_name() == Some(name)
        {
            return;
        }
        let Some(active) = reactor.layout_engine.active_workspace() else {
            return;
        };
        if !reactor.layout_engine.layout(active).contains(wid) {
            debug!(?wid, "Focused window is not tiled on the active workspace");
            return;
        }

        reactor.hide_window(wid);
        let refocus = reactor.layout_engine.layout_mut(active).remove(wid);
        let target = reactor.layout_engine.workspace_or_create(name);
        reactor.layout_engine.layout_mut(target).insert(wid);
        reactor.show(active, refocus.into());
    }

    fn handle_toggle_enlarge<S: WindowServer>(reactor: &mut Reactor<S>) {
        let Some((active, wid)) = focused_tiled_window(reactor) else {
            return;
        };
        reactor.layout_engine.layout_mut(active).toggle_enlarge(wid);
        reactor.show(active, FocusTarget::Window(wid));
    }

    fn handle_toggle_float<S: WindowServer>(reactor: &mut Reactor<S>) {
        let Some(wid) = reactor.server.focused_window() else {
            return;
        };
        let Some(active) = reactor.layout_engine.active_workspace() else {
            return;
        };
        if reactor.layout_engine.remove_floating(wid) {
            debug!(?wid, "Tiling floating window");
            reactor.layout_engine.layout_mut(active).insert(wid);
            reactor.show(active, FocusTarget::Window(wid));
        } else if reactor.layout_engine.layout(active).contains(wid) {
            debug!(?wid, "Floating tiled window");
            let Some(frame) = reactor.server.frame(wid) else {
                return;
            };
            // The refocus target is dropped; focus stays where it is.
            reactor.layout_engine.layout_mut(active).remove(wid);
            reactor.layout_engine.add_floating(wid, frame);
            reactor.show(active, FocusTarget::Unchanged);
        }
    }

    fn handle_move_focus<S: WindowServer>(reactor: &mut Reactor<S>, direction: Direction) {
        let Some((active, wid)) = focused_tiled_window(reactor) else {
            return;
        };
        let layout = reactor.layout_engine.layout(active);
        let Some(target) = layout.position_of(wid).and_then(|p| layout.focus_direction(p, direction))
        else {
            return;
        };
        if let Err(err) = reactor.server.focus(target) {
            warn!(?target, "Could not focus window: {err}");
        }
    }

    fn handle_move_window<S: WindowServer>(reactor: &mut Reactor<S>, direction: Direction) {
        let Some((active, wid)) = focused_tiled_window(reactor) else {
            return;
        };
        let layout = reactor.layout_engine.layout_mut(active);
        let Some(moved) = layout.position_of(wid).and_then(|p| layout.move_direction(p, direction))
        else {
            return;
        };
        reactor.show(active, FocusTarget::Window(moved));
    }

    fn handle_close_window<S: WindowServer>(reactor: &mut Reactor<S>) {
        let Some(wid) = reactor.server.focused_window() else {
            return;
        };
        if let Err(err) = reactor.server.close(wid) {
            warn!(?wid, "Could not close window: {err}");
        }
    }

    fn handle_switcher<S: WindowServer>(reactor: &mut Reactor<S>, step: isize) {
        let candidates = switcher::candidates(&reactor.server, &reactor.layout_engine);
        let current = reactor.server.focused_window();
        let Some(target) = switcher::cycle(&candidates, current, step) else {
            return;
        };
        if let Err(err) = reactor.server.focus(target) {
            warn!(?target, "Could not focus window: {err}");
        }
    }
}

/// The focused window along with the active workspace, when that window is
/// tiled there.
fn focused_tiled_window<S: WindowServer>(reactor: &Reactor<S>) -> Option<(WorkspaceId, WindowId)> {
    let wid = reactor.server.focused_window()?;
    let active = reactor.layout_engine.active_workspace()?;
    reactor.layout_engine.layout(active).contains(wid).then_some((active, wid))
}

impl<S: WindowServer> Reactor<S> {
    /// Activates `target`, shows it, then hides whatever was active before.
    pub(crate) fn switch_workspace(&mut self, target: WorkspaceId, focus: FocusTarget) {
        let previous = self.layout_engine.set_active_workspace(target);
        self.show(target, focus);
        if let Some(previous) = previous
            && previous != target
        {
            self.hide_workspace(previous);
        }
    }
}
