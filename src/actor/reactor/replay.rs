//! Recording of reactor input and offline replay against the headless
//! window server.
//!
//! A recording is a RON file with one value per line: the config, the screen
//! frame, then every event in the order it was handled.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, bail};
use tracing::warn;

use super::{Event, Reactor};
use crate::common::config::Config;
use crate::sys::geometry::Rect;
use crate::sys::headless::HeadlessWindowServer;

#[derive(Default)]
pub struct Record {
    file: Option<File>,
}

impl Record {
    pub fn new(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => Some(
                File::create(path)
                    .with_context(|| format!("creating recording {}", path.display()))?,
            ),
            None => None,
        };
        Ok(Self { file })
    }

    pub fn none() -> Self { Self::default() }

    pub(super) fn start(&mut self, config: &Config, screen: Rect) {
        self.write_line(config);
        self.write_line(&screen);
    }

    pub(super) fn on_event(&mut self, event: &Event) { self.write_line(event); }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) {
        let Some(file) = self.file.as_mut() else { return };
        let result = ron::ser::to_string(value)
            .map_err(anyhow::Error::from)
            .and_then(|line| writeln!(file, "{line}").map_err(anyhow::Error::from));
        if let Err(err) = result {
            warn!("Failed to write recording: {err}");
            self.file = None;
        }
    }
}

/// Applies the host-side effect of `event` to `server`, so that the reactor
/// sees the same window list the recording host had.
pub fn mirror_event(server: &mut HeadlessWindowServer, event: &Event) {
    match event {
        Event::WindowCreated(wid, info) => server.add_window(*wid, info.clone()),
        Event::WindowDestroyed(wid) => {
            server.remove_window(*wid);
        }
        Event::WindowMoved(wid, frame) => server.move_window(*wid, *frame),
        Event::WindowFocused(wid) => server.set_focused(Some(*wid)),
        Event::Start | Event::Command(_) => {}
    }
}

pub fn replay(path: &Path) -> anyhow::Result<Reactor<HeadlessWindowServer>> {
    let file = BufReader::new(
        File::open(path).with_context(|| format!("opening recording {}", path.display()))?,
    );
    let mut lines = file.lines();
    let Some(config) = lines.next() else {
        bail!("Recording {} is empty", path.display());
    };
    let config: Config = ron::de::from_str(&config?).context("parsing recorded config")?;
    let Some(screen) = lines.next() else {
        bail!("Recording {} has no screen frame", path.display());
    };
    let screen: Rect = ron::de::from_str(&screen?).context("parsing recorded screen frame")?;

    let server = HeadlessWindowServer::new(screen);
    let mut reactor = Reactor::new(config, server, Record::none());
    for (idx, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = ron::de::from_str(&line)
            .with_context(|| format!("parsing event {} of {}", idx + 1, path.display()))?;
        mirror_event(reactor.server_mut(), &event);
        reactor.handle_event(event);
    }
    Ok(reactor)
}
