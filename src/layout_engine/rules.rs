//! Static classification of newly discovered windows.
//!
//! Rules are evaluated once, when a window is first seen. Later changes to a
//! window's title or owner do not move it.

use crate::common::collections::{HashMap, HashSet};
use crate::common::config::WorkspaceSettings;
use crate::sys::window_server::WindowInfo;

#[derive(Debug, Clone, Default)]
pub struct WindowRules {
    float_titles: HashSet<String>,
    float_bundle_ids: HashSet<String>,
    app_workspaces: HashMap<String, String>,
}

impl WindowRules {
    pub fn new(settings: &WorkspaceSettings) -> Self {
        Self {
            float_titles: settings.float_titles.iter().cloned().collect(),
            float_bundle_ids: settings.float_bundle_ids.iter().cloned().collect(),
            app_workspaces: settings
                .apps
                .iter()
                .map(|(bundle_id, ws)| (bundle_id.clone(), ws.clone()))
                .collect(),
        }
    }

    pub fn is_float_by_default(&self, window: &WindowInfo) -> bool {
        self.float_titles.contains(&window.title)
            || window.bundle_id.as_ref().is_some_and(|id| self.float_bundle_ids.contains(id))
    }

    /// The workspace the owning app's windows are placed on, if configured.
    pub fn default_workspace_of(&self, window: &WindowInfo) -> Option<&str> {
        let bundle_id = window.bundle_id.as_ref()?;
        self.app_workspaces.get(bundle_id).map(String::as_str)
    }
}

/// Only visible, standard windows are tiled or tracked at all.
pub fn is_manageable(window: &WindowInfo) -> bool { window.is_visible && window.is_standard }
