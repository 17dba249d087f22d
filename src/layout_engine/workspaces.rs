use serde::{Deserialize, Serialize};

use super::Layout;
use crate::sys::window_server::WindowId;

/// Index of a workspace in the registry. Workspaces are never removed, so an
/// id stays valid for the life of the registry that issued it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(usize);

impl WorkspaceId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub layout: Layout,
}

impl Workspace {
    fn new(name: String) -> Self {
        Self { name, layout: Layout::new() }
    }
}

/// Owns every workspace, in creation order.
#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct WorkspaceRegistry {
    workspaces: Vec<Workspace>,
}

impl WorkspaceRegistry {
    pub(crate) fn new() -> Self { Self::default() }

    pub(crate) fn find(&self, name: &str) -> Option<WorkspaceId> {
        self.workspaces.iter().position(|ws| ws.name == name).map(WorkspaceId)
    }

    pub(crate) fn get_or_create(&mut self, name: &str) -> WorkspaceId {
        if let Some(id) = self.find(name) {
            return id;
        }
        tracing::debug!(name, "Creating workspace");
        self.workspaces.push(Workspace::new(name.to_string()));
        WorkspaceId(self.workspaces.len() - 1)
    }

    /// The workspace whose layout holds `wid`, if any.
    pub(crate) fn find_owning(&self, wid: WindowId) -> Option<WorkspaceId> {
        self.workspaces.iter().position(|ws| ws.layout.contains(wid)).map(WorkspaceId)
    }

    pub(crate) fn get(&self, id: WorkspaceId) -> &Workspace { &self.workspaces[id.0] }

    pub(crate) fn get_mut(&mut self, id: WorkspaceId) -> &mut Workspace {
        &mut self.workspaces[id.0]
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = WorkspaceId> + '_ {
        (0..self.workspaces.len()).map(WorkspaceId)
    }

    pub(crate) fn len(&self) -> usize { self.workspaces.len() }
}
