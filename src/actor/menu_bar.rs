//! The workspace indicator.
//!
//! Receives the active workspace's label on every redisplay and keeps the
//! last one shown. Drawing is left to whatever host UI embeds this actor.

use tracing::{debug, info};

use crate::actor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    WorkspaceChanged(String),
}

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

pub struct Menu {
    rx: Receiver,
    label: Option<String>,
}

impl Menu {
    pub fn new(rx: Receiver) -> Self { Self { rx, label: None } }

    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    /// Processes events until every sender is dropped.
    pub fn run(mut self) -> Option<String> {
        while let Some((span, event)) = self.rx.blocking_recv() {
            let _enter = span.enter();
            self.handle_event(event);
        }
        self.label
    }

    /// Handles every event already queued, without blocking.
    pub fn drain(&mut self) {
        while let Ok((span, event)) = self.rx.try_recv() {
            let _enter = span.enter();
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::WorkspaceChanged(label) => {
                if self.label.as_deref() == Some(label.as_str()) {
                    debug!(%label, "Workspace label unchanged");
                    return;
                }
                info!(%label, "Workspace indicator");
                self.label = Some(label);
            }
        }
    }
}
