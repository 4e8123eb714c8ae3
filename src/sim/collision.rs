//! Circle-bound proximity tests
//!
//! Every entity is approximated by a circle derived from its bounding box.
//! Polygon-exact tests are not worth it at arcade speeds.

use glam::Vec2;

/// Collision radius for a bounding box: half of its larger extent
#[inline]
pub fn circle_radius(size: Vec2) -> f32 {
    size.x.max(size.y) / 2.0
}

/// True if the centres are closer than the target box's circle radius.
///
/// Symmetric in `a` and `b`; `size` is the bounding box of the target.
#[inline]
pub fn circle_hit(a: Vec2, b: Vec2, size: Vec2) -> bool {
    a.distance(b) < circle_radius(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hit_inside_radius() {
        let size = Vec2::new(90.0, 90.0);
        assert!(circle_hit(Vec2::new(640.0, 400.0), Vec2::new(640.0, 360.0), size));
        assert!(!circle_hit(Vec2::new(640.0, 410.0), Vec2::new(640.0, 360.0), size));
    }

    #[test]
    fn test_uses_larger_extent() {
        let size = Vec2::new(20.0, 100.0);
        // 30 px away: outside width/2 but inside height/2
        assert!(circle_hit(Vec2::new(30.0, 0.0), Vec2::ZERO, size));
    }

    #[test]
    fn test_boundary_is_a_miss() {
        assert!(!circle_hit(Vec2::new(10.0, 0.0), Vec2::ZERO, Vec2::splat(20.0)));
    }

    proptest! {
        #[test]
        fn hit_is_symmetric(
            ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0,
            bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0,
            sw in 0.0f32..300.0, sh in 0.0f32..300.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let s = Vec2::new(sw, sh);
            prop_assert_eq!(circle_hit(a, b, s), circle_hit(b, a, s));
        }
    }
}
