//! Jagged asteroid outline used for hit tests
//!
//! The shape is generated once in local space (centered on the origin) and
//! then only translated and rotated, so the polygon the renderer draws is
//! the same one bullets are tested against.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ASTEROID_JITTER, ASTEROID_VERTICES};
use crate::polar_to_cartesian;

/// A closed polygon with a position and rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Vertices relative to the center, before rotation
    local: Vec<Vec2>,
    /// World-space center
    pub position: Vec2,
    /// Rotation (radians)
    pub rotation: f32,
}

impl Outline {
    /// Build from explicit local-space vertices
    pub fn new(local: Vec<Vec2>, position: Vec2) -> Self {
        Self {
            local,
            position,
            rotation: 0.0,
        }
    }

    /// Evenly spaced vertices with each radius jittered by ±20%
    pub fn jagged<R: Rng + ?Sized>(radius: f32, position: Vec2, rng: &mut R) -> Self {
        let step = std::f32::consts::TAU / ASTEROID_VERTICES as f32;
        let local = (0..ASTEROID_VERTICES)
            .map(|i| {
                let dist = radius * rng.random_range(1.0 - ASTEROID_JITTER..=1.0 + ASTEROID_JITTER);
                polar_to_cartesian(dist, i as f32 * step)
            })
            .collect();
        Self::new(local, position)
    }

    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local
    }

    /// World-space vertices (rotated, then translated)
    pub fn world_vertices(&self) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        self.local
            .iter()
            .map(|v| self.position + rot.rotate(*v))
            .collect()
    }

    /// Even-odd point-in-polygon test against the world-space shape
    pub fn contains(&self, point: Vec2) -> bool {
        let verts = self.world_vertices();
        let n = verts.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (verts[i], verts[j]);
            if (a.y < point.y && b.y >= point.y) || (b.y < point.y && a.y >= point.y) {
                let t = (point.y - a.y) / (b.y - a.y);
                if a.x + t * (b.x - a.x) < point.x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::FRAC_PI_4;

    fn square(half: f32, position: Vec2) -> Outline {
        Outline::new(
            vec![
                Vec2::new(-half, -half),
                Vec2::new(half, -half),
                Vec2::new(half, half),
                Vec2::new(-half, half),
            ],
            position,
        )
    }

    #[test]
    fn test_contains_translated_square() {
        let outline = square(10.0, Vec2::new(100.0, 50.0));
        assert!(outline.contains(Vec2::new(100.0, 50.0)));
        assert!(outline.contains(Vec2::new(109.0, 41.0)));
        assert!(!outline.contains(Vec2::new(111.0, 50.0)));
        assert!(!outline.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_rotation_moves_corners() {
        let mut outline = square(10.0, Vec2::ZERO);
        // Just inside the corner of the unrotated square
        let corner = Vec2::new(9.5, 9.5);
        assert!(outline.contains(corner));

        // Rotated 45°, the square becomes a diamond with a 14.1 reach on the axes
        outline.rotation = FRAC_PI_4;
        assert!(!outline.contains(corner));
        assert!(outline.contains(Vec2::new(13.5, 0.0)));
    }

    #[test]
    fn test_jagged_radius_within_jitter() {
        let mut rng = Pcg32::seed_from_u64(7);
        let outline = Outline::jagged(60.0, Vec2::new(10.0, 10.0), &mut rng);
        assert_eq!(outline.local_vertices().len(), ASTEROID_VERTICES);
        for v in outline.local_vertices() {
            let r = v.length();
            assert!((48.0 - 1e-3..=72.0 + 1e-3).contains(&r), "radius {r}");
        }
        // Always contains its own center
        assert!(outline.contains(Vec2::new(10.0, 10.0)));
        // Never reaches past the max jitter
        assert!(!outline.contains(Vec2::new(10.0 + 73.0, 10.0)));
    }

    #[test]
    fn test_degenerate_outline_contains_nothing() {
        let outline = Outline::new(vec![Vec2::ZERO, Vec2::X], Vec2::ZERO);
        assert!(!outline.contains(Vec2::new(0.5, 0.0)));
    }
}
