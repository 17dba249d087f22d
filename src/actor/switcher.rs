//! Alternate-window cycling restricted to the active workspace and floating
//! windows.

use crate::layout_engine::LayoutEngine;
use crate::sys::window_server::{WindowId, WindowServer};

/// Switcher candidates in the host's enumeration order.
pub fn candidates<S: WindowServer + ?Sized>(server: &S, engine: &LayoutEngine) -> Vec<WindowId> {
    server
        .windows()
        .into_iter()
        .filter(|&wid| engine.is_switcher_candidate(wid))
        .collect()
}

/// The candidate `step` places from `current`, wrapping around. When
/// `current` is not a candidate, cycling starts from the first candidate
/// going forwards and from the last one going backwards.
pub fn cycle(candidates: &[WindowId], current: Option<WindowId>, step: isize) -> Option<WindowId> {
    if candidates.is_empty() {
        return None;
    }
    let len = candidates.len() as isize;
    let idx = match current.and_then(|c| candidates.iter().position(|&w| w == c)) {
        Some(idx) => (idx as isize + step).rem_euclid(len),
        None if step >= 0 => 0,
        None => len - 1,
    };
    candidates.get(idx as usize).copied()
}
