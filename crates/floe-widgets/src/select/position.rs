//! Placement of the floating option panel.
//!
//! [`PositionResolver`] turns an anchor rect and list metrics into a panel
//! rect. Two modes exist:
//!
//! - [`PlacementMode::Anchored`] lines the selected item up with the anchor
//!   row, like a native select. The panel is clipped to the padded viewport
//!   and the clipped part scrolls. The resolver reports `fits == false` when
//!   too few rows remain visible or the anchor itself is off screen.
//! - [`PlacementMode::Fallback`] puts the panel under the anchor, flipping
//!   above it for pointer input when that side has more room, or shifting it
//!   back into view for touch input. It always fits.
//!
//! Resolution is a pure function of the request, so the owner can call it
//! on every frame.

use crate::overlay::inset;
use floe_core::{subscribe, Every, Subscription};
use ratatui::layout::Rect;
use std::time::Duration;

/// Which placement strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    #[default]
    Anchored,
    Fallback {
        /// Touch input: shift into view instead of flipping.
        touch: bool,
    },
}

/// Where the panel ended up relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Covering the anchor, selected row on the anchor row.
    Over,
    Below,
    Above,
}

/// Input to a [`PositionResolver`]. All coordinates are terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    /// The trigger's rect.
    pub anchor: Rect,
    /// The area the panel must stay in, usually the whole frame.
    pub viewport: Rect,
    pub item_count: usize,
    pub selected: usize,
    /// Preferred panel width including borders.
    pub width: u16,
    pub mode: PlacementMode,
    /// Rows scrolled past the resting position. Positive reveals later items.
    pub scroll_offset: i32,
    /// Gap kept between the panel and the viewport edge.
    pub padding: u16,
    /// Rows that must stay visible for anchored placement to count as fitting.
    pub min_items_visible: usize,
    /// Rows the anchor may stick out of the padded viewport in anchored mode.
    pub overflow_threshold: u16,
    /// Row cap in fallback mode.
    pub max_visible: usize,
}

/// Result of resolving a [`PlacementRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Panel rect including borders.
    pub area: Rect,
    /// Index of the item on the first inner row.
    pub first_visible: usize,
    /// Number of item rows inside the borders.
    pub visible_rows: usize,
    /// The request's scroll offset clamped to what can actually scroll.
    pub scroll_offset: i32,
    pub side: Side,
    /// `false` when anchored placement cannot show enough of the list.
    pub fits: bool,
}

impl Placement {
    /// The screen row of item `index`, if it is visible.
    pub fn row_of(&self, index: usize) -> Option<u16> {
        if index < self.first_visible || index >= self.first_visible + self.visible_rows {
            return None;
        }
        Some(self.area.y + 1 + (index - self.first_visible) as u16)
    }

    /// The item drawn on screen row `row`, if any.
    pub fn item_at(&self, row: u16) -> Option<usize> {
        let top = self.area.y + 1;
        if row < top {
            return None;
        }
        let k = (row - top) as usize;
        (k < self.visible_rows).then_some(self.first_visible + k)
    }
}

/// Computes panel placement.
pub trait PositionResolver: Send {
    fn resolve(&self, request: &PlacementRequest) -> Placement;
}

/// The built-in resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatingResolver;

impl PositionResolver for FloatingResolver {
    fn resolve(&self, request: &PlacementRequest) -> Placement {
        let bounds = inset(request.viewport, request.padding);
        match request.mode {
            PlacementMode::Anchored => anchored(request, bounds),
            PlacementMode::Fallback { touch } => fallback(request, bounds, touch),
        }
    }
}

/// Left edge one column before the anchor, so item labels (after the
/// marker column) line up with the trigger text.
fn panel_x(request: &PlacementRequest, bounds: Rect, width: u16) -> u16 {
    let max_x = bounds.right().saturating_sub(width).max(bounds.x);
    request.anchor.x.saturating_sub(1).clamp(bounds.x, max_x)
}

fn anchored(request: &PlacementRequest, bounds: Rect) -> Placement {
    let n = request.item_count as i32;
    let selected = request.selected.min(request.item_count.saturating_sub(1)) as i32;
    let height = n + 2;
    let top_bound = bounds.y as i32;
    let bottom_bound = bounds.bottom() as i32;

    let rest = request.anchor.y as i32 - 1 - selected;
    let hidden_above = (top_bound - rest).max(0);
    let hidden_below = (rest + height - bottom_bound).max(0);
    let scroll_offset = request.scroll_offset.clamp(-hidden_above, hidden_below);

    let y0 = rest - scroll_offset;
    let top = y0.max(top_bound);
    let bottom = (y0 + height).min(bottom_bound).max(top);
    let first_visible = (top - y0).clamp(0, n);
    let visible_rows = (bottom - top - 2).clamp(0, n - first_visible);

    let width = request.width.min(bounds.width);
    let area = Rect::new(
        panel_x(request, bounds, width),
        top as u16,
        width,
        (bottom - top) as u16,
    );

    let slack = request.overflow_threshold as i32;
    let anchor_top = request.anchor.y as i32;
    let anchor_bottom = request.anchor.bottom() as i32;
    let anchor_visible = anchor_top >= top_bound - slack && anchor_bottom <= bottom_bound + slack;
    let needed = request.min_items_visible.min(request.item_count);
    let fits = anchor_visible && visible_rows as usize >= needed;

    Placement {
        area,
        first_visible: first_visible as usize,
        visible_rows: visible_rows as usize,
        scroll_offset,
        side: Side::Over,
        fits,
    }
}

fn fallback(request: &PlacementRequest, bounds: Rect, touch: bool) -> Placement {
    let n = request.item_count;
    let desired = (n.min(request.max_visible) + 2) as u16;
    let anchor = request.anchor;
    let below = bounds.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(bounds.y);

    let (side, y, height) = if touch {
        let height = desired.min(bounds.height);
        let max_y = bounds.bottom().saturating_sub(height).max(bounds.y);
        (Side::Below, anchor.bottom().clamp(bounds.y, max_y), height)
    } else if below < desired && above > below {
        let height = desired.min(above);
        (Side::Above, anchor.y - height, height)
    } else {
        (Side::Below, anchor.bottom(), desired.min(below))
    };

    let visible_rows = (height.saturating_sub(2) as usize).min(n);
    let max_first = n - visible_rows;
    let selected = request.selected.min(n.saturating_sub(1));
    let resting = (selected + 1).saturating_sub(visible_rows).min(max_first) as i32;
    let first = (resting + request.scroll_offset).clamp(0, max_first as i32);

    let width = request.width.min(bounds.width);
    Placement {
        area: Rect::new(panel_x(request, bounds, width), y, width, height),
        first_visible: first as usize,
        visible_rows,
        scroll_offset: first - resting,
        side,
        fits: true,
    }
}

/// Periodic repositioning while a panel is open.
///
/// The owner returns this from `subscriptions()` only while open, so the
/// runtime starts it on open and aborts it on close or unmount.
pub fn watch<Msg: Send + 'static>(
    id: &str,
    interval: Duration,
    on_tick: impl Fn() -> Msg + Send + Sync + 'static,
) -> Subscription<Msg> {
    subscribe(Every::new(interval, format!("floe-reposition-{id}"))).map(move |_| on_tick())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(anchor: Rect, viewport: Rect, n: usize, selected: usize) -> PlacementRequest {
        PlacementRequest {
            anchor,
            viewport,
            item_count: n,
            selected,
            width: 12,
            mode: PlacementMode::Anchored,
            scroll_offset: 0,
            padding: 1,
            min_items_visible: 4,
            overflow_threshold: 1,
            max_visible: 10,
        }
    }

    #[test]
    fn anchored_aligns_selected_row_with_anchor() {
        let req = request(Rect::new(10, 10, 10, 1), Rect::new(0, 0, 80, 24), 5, 2);
        let p = FloatingResolver.resolve(&req);
        assert!(p.fits);
        assert_eq!(p.side, Side::Over);
        assert_eq!(p.area, Rect::new(9, 7, 12, 7));
        assert_eq!(p.row_of(2), Some(10));
        assert_eq!(p.item_at(10), Some(2));
        assert_eq!(p.first_visible, 0);
        assert_eq!(p.visible_rows, 5);
    }

    #[test]
    fn anchored_clips_to_padded_viewport() {
        // Selected item 6 on row 3 would put the top border at row -4.
        let req = request(Rect::new(5, 3, 10, 1), Rect::new(0, 0, 40, 20), 10, 6);
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.area.y, 1);
        assert_eq!(p.first_visible, 5);
        assert_eq!(p.row_of(6), Some(3));
        assert_eq!(p.row_of(4), None);
        assert!(p.fits);
    }

    #[test]
    fn anchored_scroll_reveals_clipped_rows_and_clamps() {
        let mut req = request(Rect::new(5, 3, 10, 1), Rect::new(0, 0, 40, 20), 10, 6);
        req.scroll_offset = -100;
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.scroll_offset, -5);
        assert_eq!(p.first_visible, 0);

        req.scroll_offset = 100;
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.scroll_offset, 0);
    }

    #[test]
    fn anchored_cramped_viewport_does_not_fit() {
        // Only two rows of items fit above the bottom edge.
        let req = request(Rect::new(5, 5, 10, 1), Rect::new(0, 0, 40, 9), 6, 0);
        let p = FloatingResolver.resolve(&req);
        assert!(p.visible_rows < 4);
        assert!(!p.fits);
    }

    #[test]
    fn anchored_offscreen_anchor_does_not_fit() {
        let req = request(Rect::new(5, 30, 10, 1), Rect::new(0, 0, 40, 20), 3, 0);
        assert!(!FloatingResolver.resolve(&req).fits);
    }

    #[test]
    fn anchored_short_list_fits_with_fewer_rows() {
        let req = request(Rect::new(5, 5, 10, 1), Rect::new(0, 0, 40, 20), 2, 0);
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.visible_rows, 2);
        assert!(p.fits);
    }

    #[test]
    fn fallback_opens_below() {
        let mut req = request(Rect::new(5, 2, 10, 1), Rect::new(0, 0, 40, 20), 3, 0);
        req.mode = PlacementMode::Fallback { touch: false };
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.side, Side::Below);
        assert_eq!(p.area, Rect::new(4, 3, 12, 5));
        assert!(p.fits);
    }

    #[test]
    fn pointer_fallback_flips_above() {
        let mut req = request(Rect::new(5, 16, 10, 1), Rect::new(0, 0, 40, 20), 6, 0);
        req.mode = PlacementMode::Fallback { touch: false };
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.side, Side::Above);
        assert_eq!(p.area.bottom(), 16);
        assert_eq!(p.area.height, 8);
    }

    #[test]
    fn touch_fallback_shifts_instead_of_flipping() {
        let mut req = request(Rect::new(5, 16, 10, 1), Rect::new(0, 0, 40, 20), 6, 0);
        req.mode = PlacementMode::Fallback { touch: true };
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.side, Side::Below);
        assert_eq!(p.area.bottom(), 19);
        assert_eq!(p.area.height, 8);
    }

    #[test]
    fn fallback_clamps_height_and_scrolls_to_selection() {
        let mut req = request(Rect::new(5, 2, 10, 1), Rect::new(0, 0, 40, 20), 30, 20);
        req.mode = PlacementMode::Fallback { touch: false };
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.visible_rows, 10);
        assert_eq!(p.first_visible, 11);
        assert!(p.row_of(20).is_some());

        req.scroll_offset = 50;
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.first_visible, 20);
        assert_eq!(p.scroll_offset, 9);
    }

    #[test]
    fn panel_stays_inside_horizontally() {
        let req = request(Rect::new(35, 10, 4, 1), Rect::new(0, 0, 40, 20), 3, 0);
        let p = FloatingResolver.resolve(&req);
        assert_eq!(p.area.right(), 39);
    }
}
