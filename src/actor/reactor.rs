//! The Reactor's job is to maintain coherence between the host's windows and
//! the layout engine.
//!
//! Window lifecycle notifications and user commands arrive as [`Event`]s and
//! are processed one at a time, to completion, in arrival order. Each handler
//! updates the [`LayoutEngine`] and then pushes the resulting geometry and
//! focus back to the [`WindowServer`].

mod display;
mod events;
pub mod replay;

#[cfg(test)]
mod tests;

pub use display::FocusTarget;
pub use replay::{Record, mirror_event, replay};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use self::events::command::CommandEventHandler;
use self::events::window::WindowEventHandler;
use crate::actor::{self, menu_bar};
use crate::common::config::{Config, Settings};
use crate::layout_engine::{Direction, LayoutEngine};
use crate::sys::geometry::Rect;
use crate::sys::window_server::{WindowId, WindowInfo, WindowServer};

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    /// Activates the first workspace and adopts every window the host
    /// already has. Everything delivered before this is dropped.
    Start,
    /// A window appeared. Carries the host's view of the window at creation,
    /// which is what the window is classified by.
    WindowCreated(WindowId, WindowInfo),
    WindowDestroyed(WindowId),
    WindowMoved(WindowId, Rect),
    WindowFocused(WindowId),
    Command(Command),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SwitchToWorkspace(String),
    SendToWorkspace(String),
    NextWorkspace,
    PrevWorkspace,
    MoveFocus(Direction),
    MoveWindow(Direction),
    ToggleEnlarge,
    ToggleFloat,
    CloseWindow,
    SwitcherNext,
    SwitcherPrevious,
}

pub struct Reactor<S: WindowServer> {
    pub(crate) server: S,
    pub(crate) layout_engine: LayoutEngine,
    pub(crate) settings: Settings,
    config: Config,
    menu_tx: Option<menu_bar::Sender>,
    record: Record,
}

impl<S: WindowServer> Reactor<S> {
    pub fn new(config: Config, server: S, mut record: Record) -> Self {
        record.start(&config, server.screen_frame());
        Self {
            server,
            layout_engine: LayoutEngine::new(&config.workspaces),
            settings: config.settings.clone(),
            config,
            menu_tx: None,
            record,
        }
    }

    pub fn with_menu(mut self, menu_tx: menu_bar::Sender) -> Self {
        self.menu_tx = Some(menu_tx);
        self
    }

    pub fn server(&self) -> &S { &self.server }

    pub fn server_mut(&mut self) -> &mut S { &mut self.server }

    pub fn layout_engine(&self) -> &LayoutEngine { &self.layout_engine }

    /// Name of the active workspace, once started.
    pub fn active_workspace_name(&self) -> Option<&str> {
        let id = self.layout_engine.active_workspace()?;
        Some(self.layout_engine.workspace(id).name.as_str())
    }

    /// Handles events from `rx` until every sender is dropped. `on_event`
    /// sees each event, with the server, before the reactor does.
    pub fn run(mut self, mut rx: Receiver, mut on_event: impl FnMut(&mut S, &Event)) -> Self {
        while let Some((span, event)) = rx.blocking_recv() {
            let _guard = span.enter();
            on_event(&mut self.server, &event);
            self.handle_event(event);
        }
        self
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let span = debug_span!("reactor::handle_event", ?event);
        let _guard = span.enter();
        self.record.on_event(&event);

        if !matches!(event, Event::Start) && self.layout_engine.active_workspace().is_none() {
            debug!("Reactor not started; dropping event");
            return;
        }

        match event {
            Event::Start => self.start(),
            Event::WindowCreated(wid, info) => {
                WindowEventHandler::handle_window_created(self, wid, info)
            }
            Event::WindowDestroyed(wid) => WindowEventHandler::handle_window_destroyed(self, wid),
            Event::WindowMoved(wid, frame) => {
                WindowEventHandler::handle_window_moved(self, wid, frame)
            }
            Event::WindowFocused(wid) => WindowEventHandler::handle_window_focused(self, wid),
            Event::Command(cmd) => CommandEventHandler::handle_command(self, cmd),
        }

        debug_assert!(
            self.layout_engine.check_invariants().is_empty(),
            "layout invariants broken: {:?}",
            self.layout_engine.check_invariants()
        );
    }

    fn start(&mut self) {
        if self.layout_engine.active_workspace().is_some() {
            debug!("Reactor already started");
            return;
        }
        let Some(first) = self.config.workspaces.names.first().cloned() else {
            warn!("No workspaces declared; staying idle");
            return;
        };
        let active = self.layout_engine.workspace_or_create(&first);
        self.layout_engine.set_active_workspace(active);

        for wid in self.server.windows() {
            let Some(info) = self.server.window_info(wid) else {
                debug!(?wid, "Window vanished during discovery");
                continue;
            };
            WindowEventHandler::discover_window(self, wid, info);
        }
        self.show(active, FocusTarget::Unchanged);
    }

    pub(crate) fn update_indicator(&self) {
        let (Some(tx), Some(name)) = (&self.menu_tx, self.active_workspace_name()) else {
            return;
        };
        tx.send(menu_bar::Event::WorkspaceChanged(name.to_string()));
    }
}
