pub mod engine;
mod floating;
pub mod frames;
pub(crate) mod graph;
mod layout;
pub mod rules;
mod workspaces;

pub use engine::LayoutEngine;
pub use floating::FloatingWindow;
pub use frames::{compute_frames, hidden_frame};
pub use graph::{Direction, Position};
pub use layout::Layout;
pub use rules::{WindowRules, is_manageable};
pub use workspaces::{Workspace, WorkspaceId};
