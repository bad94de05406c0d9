//! Toroidal world bounds
//!
//! Leaving one edge teleports to the opposite edge. The reset is a hard
//! snap to the edge coordinate, not a modulo: an entity that overshoots by
//! 30 units re-enters exactly at the far edge, losing the 30.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// World size; both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl WorldBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Wrap `position` in place
    #[inline]
    pub fn wrap(&self, position: &mut Vec2) {
        if position.x < 0.0 {
            position.x = self.width;
        }
        if position.x > self.width {
            position.x = 0.0;
        }
        if position.y < 0.0 {
            position.y = self.height;
        }
        if position.y > self.height {
            position.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges_are_inclusive() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut p = Vec2::new(0.0, 720.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(0.0, 720.0));

        let mut p = Vec2::new(1280.0, 0.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(1280.0, 0.0));
    }

    #[test]
    fn test_overshoot_snaps_to_opposite_edge() {
        let bounds = WorldBounds::new(1280.0, 720.0);
        let mut p = Vec2::new(1310.0, -5.0);
        bounds.wrap(&mut p);
        // Hard reset, the 30 units of overshoot are dropped
        assert_eq!(p, Vec2::new(0.0, 720.0));

        let mut p = Vec2::new(-0.5, 800.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(1280.0, 0.0));
    }

    #[test]
    fn test_interior_untouched() {
        let bounds = WorldBounds::default();
        let mut p = Vec2::new(12.5, 600.0);
        bounds.wrap(&mut p);
        assert_eq!(p, Vec2::new(12.5, 600.0));
        assert!(bounds.contains(p));
    }

    proptest! {
        #[test]
        fn prop_wrap_lands_inside(
            x in -5_000.0f32..5_000.0,
            y in -5_000.0f32..5_000.0,
            w in 1.0f32..4_000.0,
            h in 1.0f32..4_000.0,
        ) {
            let bounds = WorldBounds::new(w, h);
            let mut p = Vec2::new(x, y);
            bounds.wrap(&mut p);
            prop_assert!(p.x >= 0.0 && p.x <= w);
            prop_assert!(p.y >= 0.0 && p.y <= h);
        }
    }
}
