use serde::Serialize;
use tracing::debug;

use super::floating::{FloatingManager, FloatingWindow};
use super::rules::WindowRules;
use super::workspaces::{Workspace, WorkspaceId, WorkspaceRegistry};
use super::{Layout, Position};
use crate::common::collections::HashSet;
use crate::common::config::WorkspaceSettings;
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowId;

/// All window-manager state that is independent of the host: the workspace
/// registry, the floating set and which workspace is active.
#[derive(Serialize, Debug)]
pub struct LayoutEngine {
    workspaces: WorkspaceRegistry,
    floating: FloatingManager,
    active: Option<WorkspaceId>,
    #[serde(skip)]
    rules: WindowRules,
}

impl LayoutEngine {
    pub fn new(settings: &WorkspaceSettings) -> Self {
        Self {
            workspaces: WorkspaceRegistry::new(),
            floating: FloatingManager::new(),
            active: None,
            rules: WindowRules::new(settings),
        }
    }

    pub fn rules(&self) -> &WindowRules { &self.rules }

    pub fn active_workspace(&self) -> Option<WorkspaceId> { self.active }

    /// Makes `id` the active workspace and returns the previously active one.
    pub fn set_active_workspace(&mut self, id: WorkspaceId) -> Option<WorkspaceId> {
        debug!(name = %self.workspaces.get(id).name, "Activating workspace");
        self.active.replace(id)
    }

    pub fn workspace(&self, id: WorkspaceId) -> &Workspace { self.workspaces.get(id) }

    pub fn layout(&self, id: WorkspaceId) -> &Layout { &self.workspaces.get(id).layout }

    pub fn layout_mut(&mut self, id: WorkspaceId) -> &mut Layout {
        &mut self.workspaces.get_mut(id).layout
    }

    pub fn find_workspace(&self, name: &str) -> Option<WorkspaceId> { self.workspaces.find(name) }

    pub fn workspace_or_create(&mut self, name: &str) -> WorkspaceId {
        self.workspaces.get_or_create(name)
    }

    pub fn workspace_of(&self, wid: WindowId) -> Option<WorkspaceId> {
        self.workspaces.find_owning(wid)
    }

    /// The workspace `step` places away from the active one in creation
    /// order, wrapping around at either end.
    pub fn neighbor_workspace(&self, step: isize) -> Option<WorkspaceId> {
        let active = self.active?;
        let len = self.workspaces.len() as isize;
        let idx = (active.index() as isize + step).rem_euclid(len) as usize;
        self.workspaces.ids().nth(idx)
    }

    /// Position of `wid` in the active workspace's layout.
    pub fn active_position_of(&self, wid: WindowId) -> Option<Position> {
        self.active.and_then(|id| self.layout(id).position_of(wid))
    }

    pub fn is_floating(&self, wid: WindowId) -> bool { self.floating.is_floating(wid) }

    pub fn add_floating(&mut self, wid: WindowId, frame: Rect) {
        self.floating.add_floating(wid, frame);
    }

    pub fn remove_floating(&mut self, wid: WindowId) -> bool { self.floating.remove_floating(wid) }

    pub fn refresh_floating_frame(&mut self, wid: WindowId, frame: Rect) {
        self.floating.refresh_frame(wid, frame);
    }

    pub fn floating_window(&self, wid: WindowId) -> Option<&FloatingWindow> {
        self.floating.get(wid)
    }

    pub fn floating_windows(&self) -> Vec<WindowId> { self.floating.windows() }

    /// Whether `wid` is in any layout or the floating set.
    pub fn is_tracked(&self, wid: WindowId) -> bool {
        self.is_floating(wid) || self.workspace_of(wid).is_some()
    }

    /// Windows an alternate-window chooser may offer: members of the active
    /// workspace plus every floating window.
    pub fn is_switcher_candidate(&self, wid: WindowId) -> bool {
        self.active_position_of(wid).is_some() || self.is_floating(wid)
    }

    /// Lists every broken membership invariant. Empty when the state is
    /// consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut seen = HashSet::default();
        for id in self.workspaces.ids() {
            let ws = self.workspaces.get(id);
            let layout = &ws.layout;
            if let Some(main) = layout.main()
                && layout.others().contains(&main)
            {
                issues.push(format!("{main} is both main and stacked in {:?}", ws.name));
            }
            if let Some(large) = layout.temp_large()
                && !layout.contains(large)
            {
                issues.push(format!("enlarged {large} is not a member of {:?}", ws.name));
            }
            for wid in layout.windows() {
                if !seen.insert(wid) {
                    issues.push(format!("{wid} appears more than once (seen again in {:?})", ws.name));
                }
                if self.is_floating(wid) {
                    issues.push(format!("{wid} is tiled in {:?} and floating", ws.name));
                }
            }
        }
        issues
    }

    pub fn serialize_to_string(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .unwrap_or_else(|err| format!("<unserializable layout: {err}>"))
    }
}
