//! Geometry and rendering helpers for floating overlays.
//!
//! Floating panels are drawn after the regular layout, over a cleared area,
//! and may extend outside the area their parent handed them. These helpers
//! keep such rects inside the frame.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Shrink `area` by `padding` cells on every side.
pub fn inset(area: Rect, padding: u16) -> Rect {
    let dx = padding.min(area.width / 2);
    let dy = padding.min(area.height / 2);
    Rect::new(
        area.x + dx,
        area.y + dy,
        area.width - dx * 2,
        area.height - dy * 2,
    )
}

/// Move `rect` so it lies inside `bounds`, shrinking it only if it is larger
/// than `bounds`.
pub fn shift_into(rect: Rect, bounds: Rect) -> Rect {
    let width = rect.width.min(bounds.width);
    let height = rect.height.min(bounds.height);
    let max_x = bounds.right().saturating_sub(width);
    let max_y = bounds.bottom().saturating_sub(height);
    Rect::new(
        rect.x.clamp(bounds.x, max_x.max(bounds.x)),
        rect.y.clamp(bounds.y, max_y.max(bounds.y)),
        width,
        height,
    )
}

/// Whether terminal cell `(column, row)` falls inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Clear the overlay area and optionally render a block border.
///
/// Returns the inner area (after block padding, if any).
pub fn render_overlay(frame: &mut Frame, area: Rect, block: Option<&Block>) -> Rect {
    frame.render_widget(Clear, area);
    if let Some(block) = block {
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);
        inner
    } else {
        area
    }
}
