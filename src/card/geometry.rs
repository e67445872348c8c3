//! Screen geometry for the evasive button
//!
//! Offsets are relative to the button's natural layout position, in CSS
//! pixels, with y growing downward (the same space as a CSS translate).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOTTOM_MARGIN, LEFT_MARGIN};

/// An on-screen rectangle, as reported by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The same rectangle moved by an offset
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }
}

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the whole rectangle is visible
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left >= 0.0
            && rect.top >= 0.0
            && rect.right() <= self.width
            && rect.bottom() <= self.height
    }
}

/// Sampling limits for the button offset.
///
/// `left`/`right` are the x endpoints and `top`/`bottom` the y endpoints. They
/// are endpoints, not an ordered range: in the usual layout `left` is negative
/// (moving toward the left edge) and `right` positive, so the interval is
/// "inverted" with respect to its names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    /// x endpoints in sampling order
    pub fn x_interval(&self) -> (f32, f32) {
        (self.right, self.left)
    }

    /// y endpoints in sampling order, with the top raised by `boost`
    pub fn y_interval(&self, boost: f32) -> (f32, f32) {
        (self.bottom, self.top + boost)
    }

    /// True if `offset` lies between the endpoints on both axes
    pub fn contains(&self, offset: Vec2, boost: f32) -> bool {
        let (x0, x1) = self.x_interval();
        let (y0, y1) = self.y_interval(boost);
        between(offset.x, x0, x1) && between(offset.y, y0, y1)
    }
}

#[inline]
fn between(v: f32, a: f32, b: f32) -> bool {
    v >= a.min(b) && v <= a.max(b)
}

/// Compute the sampling limits for a button at `element` inside `viewport`.
///
/// Any offset between the endpoints keeps the whole button on screen: the
/// left edge stays at least `LEFT_MARGIN` in, the right edge leaves a button
/// width of room, the top edge stays on screen, and the bottom edge leaves a
/// button height plus `BOTTOM_MARGIN`. Values are rounded to whole pixels
/// toward the inside of the viewport.
pub fn initialize_bounds(element: Rect, viewport: Viewport) -> Bounds {
    Bounds {
        left: (-element.left + LEFT_MARGIN).ceil(),
        right: (viewport.width - element.right() - element.width).floor(),
        top: (-element.top).ceil(),
        bottom: (viewport.height - element.bottom() - element.height - BOTTOM_MARGIN).floor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_for_centered_button() {
        // 100x50 button centered in a 1000x800 viewport
        let element = Rect::new(450.0, 375.0, 100.0, 50.0);
        let bounds = initialize_bounds(element, Viewport::new(1000.0, 800.0));

        assert_eq!(bounds.left, -400.0);
        assert_eq!(bounds.right, 350.0);
        assert_eq!(bounds.top, -375.0);
        assert_eq!(bounds.bottom, 225.0);
    }

    #[test]
    fn test_bounds_round_inward() {
        let element = Rect::new(450.4, 375.6, 100.2, 50.5);
        let bounds = initialize_bounds(element, Viewport::new(1000.0, 800.0));
        assert_eq!(bounds.left, -400.0);
        assert_eq!(bounds.right, 349.0);
        assert_eq!(bounds.top, -375.0);
        assert_eq!(bounds.bottom, 223.0);
    }

    #[test]
    fn test_fractional_top_keeps_button_on_screen() {
        let element = Rect::new(450.0, 375.6, 100.0, 50.0);
        let viewport = Viewport::new(1000.0, 800.0);
        let bounds = initialize_bounds(element, viewport);

        let moved = element.translated(Vec2::new(0.0, bounds.top));
        assert!(moved.top >= 0.0, "button top at {} is off-screen", moved.top);
        assert!(viewport.contains(&moved));
    }

    #[test]
    fn test_endpoint_offsets_stay_on_screen() {
        let viewport = Viewport::new(1000.0, 800.0);
        for element in [
            Rect::new(450.0, 375.0, 100.0, 50.0),
            Rect::new(450.7, 375.3, 100.4, 50.6),
        ] {
            let bounds = initialize_bounds(element, viewport);
            for x in [bounds.left, bounds.right] {
                for y in [bounds.top, bounds.bottom] {
                    let moved = element.translated(Vec2::new(x, y));
                    assert!(viewport.contains(&moved), "{:?} leaves the viewport", moved);
                    assert!(moved.left >= LEFT_MARGIN);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_sampled_offsets_keep_button_inside(
            w in 400.0f32..2400.0,
            h in 400.0f32..1600.0,
            bw in 40.0f32..160.0,
            bh in 20.0f32..80.0,
            fx in 0.2f32..0.6,
            fy in 0.2f32..0.6,
            jx in 0.0f32..1.0,
            jy in 0.0f32..1.0,
            tx in 0.0f32..=1.0,
            ty in 0.0f32..=1.0,
        ) {
            let viewport = Viewport::new(w, h);
            // Layout rarely lands on whole pixels
            let element = Rect::new((w * fx).floor() + jx, (h * fy).floor() + jy, bw, bh);
            let bounds = initialize_bounds(element, viewport);

            let (x0, x1) = bounds.x_interval();
            let (y0, y1) = bounds.y_interval(0.0);
            let offset = Vec2::new(x0 + tx * (x1 - x0), y0 + ty * (y1 - y0));
            let moved = element.translated(offset);

            prop_assert!(viewport.contains(&moved), "{:?} leaves {:?}", moved, viewport);
        }
    }
}
