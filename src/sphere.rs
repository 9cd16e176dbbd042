//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection by solving the quadratic
//! `a t^2 + b t + c = 0` along the ray.

use glam::Vec3A;
use crate::ray::Ray;
use crate::hittable::{Hittable, HitRecord};
use crate::interval::Interval;
use crate::material::Material;

/// Discriminants below this count as a miss, so grazing rays never hit.
pub const TANGENT_EPSILON: f32 = 1e-4;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = r.origin - self.center;
        let a = r.direction.length_squared();
        let b = 2.0 * oc.dot(r.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < TANGENT_EPSILON {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first, then the far one (ray starting inside)
        let mut root = (-b - sqrtd) / (2.0 * a);
        if !ray_t.contains(root) {
            root = (-b + sqrtd) / (2.0 * a);
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (r.at(root) - self.center) / self.radius;
        Some(HitRecord::new(r, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3A::ZERO, 1.0, Material::lambert(Vec3A::ONE))
    }

    #[test]
    fn head_on_ray_hits_at_distance_minus_radius() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let rec = unit_sphere().hit(&ray, Interval::from_min(1e-4)).expect("should hit");
        assert_relative_eq!(rec.t, 4.0, epsilon = 1e-4);
        assert_relative_eq!(rec.normal.z, 1.0, epsilon = 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn offset_ray_misses() {
        let ray = Ray::new(Vec3A::new(0.0, 1.5, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(unit_sphere().hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn tangent_ray_misses() {
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert!(unit_sphere().hit(&ray, Interval::from_min(1e-4)).is_none());
    }

    #[test]
    fn ray_from_inside_uses_far_root() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::X);
        let rec = unit_sphere().hit(&ray, Interval::from_min(1e-4)).expect("should hit");
        assert_relative_eq!(rec.t, 1.0, epsilon = 1e-4);
        assert!(!rec.front_face);
    }

    #[test]
    fn sphere_behind_ray_misses() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::Z);
        assert!(unit_sphere().hit(&ray, Interval::from_min(1e-4)).is_none());
    }
}
