//! Toroidal world geometry
//!
//! The world is a `width × height` rectangle whose opposite edges are glued
//! together. Positions are folded back into `[0, width) × [0, height)` after
//! every integration step, and anything straddling an edge gets a second
//! "ghost" draw on the far side so it crosses the seam without popping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fold one coordinate into `[0, d)`
#[inline]
fn wrap_axis(v: f32, d: f32) -> f32 {
    let mut r = v % d;
    if r < 0.0 {
        r += d;
    }
    // `r + d` can round up to exactly `d` for tiny negative remainders
    if r >= d { 0.0 } else { r }
}

/// Periodic wrap of a position into the world rectangle.
///
/// Exact remainder per axis (`((v mod d) + d) mod d`), so negative values wrap
/// to the far edge instead of truncating toward zero.
#[inline]
pub fn wrap(position: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(position.x, width), wrap_axis(position.y, height))
}

/// Companion draw position for an entity whose bounding box crosses an edge.
///
/// Returns `None` when the box lies fully inside the world. When several edges
/// are crossed the last matching rule wins: left, top, right, bottom.
pub fn ghost_offset(position: Vec2, half_size: Vec2, width: f32, height: f32) -> Option<Vec2> {
    let mut ghost = None;
    if position.x - half_size.x < 0.0 {
        ghost = Some(Vec2::new(position.x + width, position.y));
    }
    if position.y - half_size.y < 0.0 {
        ghost = Some(Vec2::new(position.x, position.y + height));
    }
    if position.x + half_size.x > width {
        ghost = Some(Vec2::new(position.x - width, position.y));
    }
    if position.y + half_size.y > height {
        ghost = Some(Vec2::new(position.x, position.y - height));
    }
    ghost
}

/// World rectangle dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "world bounds must be positive");
        Self { width, height }
    }

    #[inline]
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        wrap(position, self.width, self.height)
    }

    #[inline]
    pub fn ghost(&self, position: Vec2, half_size: Vec2) -> Option<Vec2> {
        ghost_offset(position, half_size, self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True for positions inside `[0, width) × [0, height)`
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Shortest displacement from `a` to `b` across the seams
    pub fn delta(&self, a: Vec2, b: Vec2) -> Vec2 {
        let mut d = b - a;
        if d.x > self.width / 2.0 {
            d.x -= self.width;
        } else if d.x < -self.width / 2.0 {
            d.x += self.width;
        }
        if d.y > self.height / 2.0 {
            d.y -= self.height;
        } else if d.y < -self.height / 2.0 {
            d.y += self.height;
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f32 = 1280.0;
    const H: f32 = 720.0;

    #[test]
    fn test_wrap_negative() {
        let p = wrap(Vec2::new(-10.0, -730.0), W, H);
        assert!((p.x - 1270.0).abs() < 1e-3);
        assert!((p.y - 710.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_past_far_edge() {
        let p = wrap(Vec2::new(1290.0, 720.0), W, H);
        assert!((p.x - 10.0).abs() < 1e-3);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let p = wrap(Vec2::new(-1e-9, -1e-9), W, H);
        assert!(p.x >= 0.0 && p.x < W);
        assert!(p.y >= 0.0 && p.y < H);
    }

    #[test]
    fn test_no_ghost_inside() {
        let half = Vec2::splat(20.0);
        assert_eq!(ghost_offset(Vec2::new(640.0, 360.0), half, W, H), None);
        assert_eq!(ghost_offset(Vec2::new(20.0, 20.0), half, W, H), None);
    }

    #[test]
    fn test_ghost_left_edge() {
        let p = Vec2::new(5.0, 300.0);
        let ghost = ghost_offset(p, Vec2::splat(20.0), W, H).unwrap();
        assert_eq!(ghost.x, p.x + W);
        assert_eq!(ghost.y, p.y);
    }

    #[test]
    fn test_ghost_right_and_bottom() {
        let half = Vec2::splat(20.0);
        let ghost = ghost_offset(Vec2::new(1275.0, 300.0), half, W, H).unwrap();
        assert_eq!(ghost, Vec2::new(1275.0 - W, 300.0));
        let ghost = ghost_offset(Vec2::new(600.0, 710.0), half, W, H).unwrap();
        assert_eq!(ghost, Vec2::new(600.0, 710.0 - H));
    }

    #[test]
    fn test_ghost_corner_last_rule_wins() {
        // Crosses left and top; the top rule is checked later
        let ghost = ghost_offset(Vec2::new(5.0, 5.0), Vec2::splat(20.0), W, H).unwrap();
        assert_eq!(ghost, Vec2::new(5.0, 5.0 + H));
    }

    #[test]
    fn test_delta_across_seam() {
        let bounds = WorldBounds::new(W, H);
        let d = bounds.delta(Vec2::new(1270.0, 10.0), Vec2::new(10.0, 710.0));
        assert!((d.x - 20.0).abs() < 1e-3);
        assert!((d.y + 20.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn wrap_is_idempotent_and_in_range(
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
            w in 1.0f32..4096.0,
            h in 1.0f32..4096.0,
        ) {
            let once = wrap(Vec2::new(x, y), w, h);
            let twice = wrap(once, w, h);
            prop_assert_eq!(once, twice);
            prop_assert!(once.x >= 0.0 && once.x < w);
            prop_assert!(once.y >= 0.0 && once.y < h);
        }

        #[test]
        fn ghost_is_none_when_box_is_inside(
            x in 50.0f32..1230.0,
            y in 50.0f32..670.0,
            half in 0.0f32..50.0,
        ) {
            prop_assert_eq!(ghost_offset(Vec2::new(x, y), Vec2::splat(half), W, H), None);
        }

        #[test]
        fn ghost_crossing_left_shifts_by_width(
            x in 0.0f32..19.0,
            y in 100.0f32..600.0,
        ) {
            let ghost = ghost_offset(Vec2::new(x, y), Vec2::splat(20.0), W, H);
            prop_assert_eq!(ghost, Some(Vec2::new(x + W, y)));
        }
    }
}
