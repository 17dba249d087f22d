//! Tiling geometry for a main + stack layout.
//!
//! The main window occupies the right half of the screen and the stack is
//! split into equal slots down the left half. All widths and heights are
//! floored to whole pixels.

use super::Layout;
use crate::common::config::HideCorner;
use crate::sys::geometry::{Point, Rect};
use crate::sys::window_server::WindowId;

/// Computes the frame of every window in `layout`, main first, then the stack
/// from top to bottom.
pub fn compute_frames(
    layout: &Layout,
    screen: Rect,
    margin: f64,
    enlarge_ratio: f64,
) -> Vec<(WindowId, Rect)> {
    let Some(main) = layout.main() else {
        return Vec::new();
    };
    let others = layout.others();

    let usable_width = screen.size.width - 3.0 * margin;
    let usable_height = screen.size.height - 2.0 * margin;
    let half_width = (usable_width / 2.0).floor();
    let large_width = (usable_width * enlarge_ratio).floor();

    let mut main_frame = Rect::from_xywh(
        screen.size.width - margin - half_width,
        screen.origin.y + margin,
        half_width,
        usable_height,
    );
    if others.is_empty() {
        main_frame.origin.x = screen.origin.x + margin;
        main_frame.size.width = usable_width;
    } else if layout.temp_large() == Some(main) {
        main_frame.origin.x = screen.size.width - margin - large_width;
        main_frame.size.width = large_width;
    }

    let mut frames = Vec::with_capacity(others.len() + 1);
    frames.push((main, main_frame));

    let n = others.len() as f64;
    let slot_height = ((usable_height - margin * (n - 1.0)) / n).floor();
    for (idx, &wid) in others.iter().enumerate() {
        let i = (idx + 1) as f64;
        let frame = if layout.temp_large() == Some(wid) {
            Rect::from_xywh(
                screen.origin.x + margin,
                main_frame.origin.y,
                large_width,
                main_frame.size.height,
            )
        } else {
            Rect::from_xywh(
                screen.origin.x + margin,
                screen.origin.y + margin * i + slot_height * (i - 1.0),
                half_width,
                slot_height,
            )
        };
        frames.push((wid, frame));
    }

    frames
}

/// The frame that keeps a window of `current` size just outside `screen`.
///
/// Returns `None` for windows without an area, which have nothing to hide.
pub fn hidden_frame(current: Rect, screen: Rect, corner: HideCorner) -> Option<Rect> {
    if current.size.is_empty() {
        return None;
    }
    let screen_max = screen.max();
    let origin = match corner {
        HideCorner::BottomRight => Point::new(screen_max.x, screen_max.y),
        HideCorner::BottomLeft => {
            Point::new(screen.origin.x - current.size.width, screen_max.y)
        }
    };
    Some(current.with_origin(origin))
}
