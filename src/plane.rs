//! Infinite plane primitive with an optional checkerboard color.

use glam::Vec3A;
use serde::{Deserialize, Serialize};

use crate::hittable::{Hittable, HitRecord};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::vector::{self, Color};

/// Rays closer to parallel than this never hit a plane.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Procedural checkerboard over the world X/Z axes.
///
/// A point's cell index is `floor(x / scale) + floor(z / scale)`; even cells
/// get `even`, odd cells get `odd`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checker {
    /// Edge length of one cell in world units.
    pub scale: f32,
    /// Color of cells with an even index sum.
    pub even: Color,
    /// Color of cells with an odd index sum.
    pub odd: Color,
}

impl Checker {
    /// Create a checker pattern.
    pub fn new(scale: f32, even: Color, odd: Color) -> Self {
        Self { scale, even, odd }
    }

    /// Color of the cell containing `p`.
    pub fn color_at(&self, p: Vec3A) -> Color {
        let inv_scale = 1.0 / self.scale;
        let ix = (p.x * inv_scale).floor() as i64;
        let iz = (p.z * inv_scale).floor() as i64;
        // Saturated indices still wrap to the right parity
        if ix.wrapping_add(iz).rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// Infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Unit normal; normalized by the constructor.
    pub normal: Vec3A,
    /// Material of the plane.
    pub material: Material,
    /// Optional per-hit color override.
    pub checker: Option<Checker>,
}

impl Plane {
    /// Create a plane. The normal is normalized.
    pub fn new(point: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            point,
            normal: vector::normalize(normal),
            material,
            checker: None,
        }
    }

    /// Attach a checkerboard color override.
    pub fn with_checker(mut self, checker: Checker) -> Self {
        self.checker = Some(checker);
        self
    }
}

impl Hittable for Plane {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = r.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - r.origin).dot(self.normal) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let mut rec = HitRecord::new(r, t, self.normal, self.material);
        if let Some(checker) = &self.checker {
            rec.material = self.material.with_color(checker.color_at(rec.p));
        }
        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WHITE: Vec3A = Vec3A::ONE;
    const BLACK: Vec3A = Vec3A::ZERO;

    #[test]
    fn checker_parity() {
        let checker = Checker::new(2.0, WHITE, BLACK);
        // cells (0,0) and (1,1): even sums
        assert_eq!(checker.color_at(Vec3A::new(0.5, 0.0, 0.5)), WHITE);
        assert_eq!(checker.color_at(Vec3A::new(2.5, 0.0, 3.0)), WHITE);
        // cells (1,0) and (-1,0): odd sums
        assert_eq!(checker.color_at(Vec3A::new(2.5, 0.0, 0.5)), BLACK);
        assert_eq!(checker.color_at(Vec3A::new(-0.5, 0.0, 0.5)), BLACK);
        // cell (-1,-1): even
        assert_eq!(checker.color_at(Vec3A::new(-0.5, 0.0, -0.5)), WHITE);
    }

    #[test]
    fn checker_survives_saturating_cell_indices() {
        let checker = Checker::new(1e-30, WHITE, BLACK);
        let far = Vec3A::new(f32::MAX, 0.0, f32::MAX);
        assert_eq!(checker.color_at(far), WHITE);
        let mixed = Vec3A::new(f32::MAX, 0.0, -f32::MAX);
        assert_eq!(checker.color_at(mixed), checker.color_at(mixed));
    }

    #[test]
    fn checker_is_idempotent() {
        let checker = Checker::new(0.75, WHITE, BLACK);
        let p = Vec3A::new(-3.3, 0.0, 7.1);
        assert_eq!(checker.color_at(p), checker.color_at(p));
    }

    #[test]
    fn floor_hit_overrides_color_without_mutating_plane() {
        let base = Material::lambert(Vec3A::new(0.5, 0.5, 0.5));
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y, base)
            .with_checker(Checker::new(1.0, WHITE, BLACK));
        let ray = Ray::new(Vec3A::new(1.5, 2.0, 0.5), Vec3A::new(0.0, -1.0, 0.0));
        let rec = plane.hit(&ray, Interval::from_min(1e-4)).expect("should hit");
        assert_relative_eq!(rec.t, 2.0, epsilon = 1e-5);
        assert!(matches!(rec.material, Material::Lambert { color, .. } if color == BLACK));
        assert_eq!(plane.material, base);
    }

    #[test]
    fn parallel_and_receding_rays_miss() {
        let plane = Plane::new(Vec3A::ZERO, Vec3A::Y, Material::lambert(WHITE));
        let parallel = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::X);
        let away = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::Y);
        assert!(plane.hit(&parallel, Interval::from_min(1e-4)).is_none());
        assert!(plane.hit(&away, Interval::from_min(1e-4)).is_none());
    }
}
