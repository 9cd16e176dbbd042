//! Pinhole camera for primary ray generation.

use glam::Vec3A;

use crate::ray::Ray;
use crate::vector;

/// Pinhole camera with a precomputed orthonormal basis.
///
/// Maps normalized device coordinates `(u, v)` in `[-1, 1]^2` to world-space
/// rays. `v` grows upward; callers working in top-left pixel space flip it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space (the lookfrom point)
    position: Vec3A,
    /// Unit view direction
    forward: Vec3A,
    /// Camera frame basis vector pointing right
    right: Vec3A,
    /// Camera frame basis vector pointing up
    up: Vec3A,
    /// tan(vfov / 2) scaled by the aspect ratio
    half_width: f32,
    /// tan(vfov / 2)
    half_height: f32,
}

impl Camera {
    /// Build a camera looking from `lookfrom` toward `lookat`.
    ///
    /// `vfov` is the vertical field of view in degrees; `aspect_ratio` is
    /// width over height.
    pub fn new(lookfrom: Vec3A, lookat: Vec3A, vup: Vec3A, vfov: f32, aspect_ratio: f32) -> Self {
        let forward = vector::normalize(lookat - lookfrom);
        let right = vector::normalize(forward.cross(vup));
        let up = right.cross(forward);

        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = half_height * aspect_ratio;

        Self { position: lookfrom, forward, right, up, half_width, half_height }
    }

    /// Ray through normalized device coordinates `(u, v)`.
    pub fn ray_for(&self, u: f32, v: f32) -> Ray {
        let direction = self.forward
            + self.right * (u * self.half_width)
            + self.up * (v * self.half_height);
        Ray::new(self.position, vector::normalize(direction))
    }

    /// Camera position.
    pub fn position(&self) -> Vec3A {
        self.position
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3A {
        self.forward
    }

    /// Basis `(forward, right, up)`.
    pub fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        (self.forward, self.right, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3A::new(0.0, 1.0, 5.0), Vec3A::new(0.0, 0.5, 0.0), Vec3A::Y, 60.0, 16.0 / 9.0)
    }

    #[test]
    fn basis_is_orthonormal() {
        let (f, r, u) = camera().basis();
        for v in [f, r, u] {
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(f.dot(r), 0.0, epsilon = 1e-5);
        assert_relative_eq!(f.dot(u), 0.0, epsilon = 1e-5);
        assert_relative_eq!(r.dot(u), 0.0, epsilon = 1e-5);
        assert!(u.y > 0.0);
    }

    #[test]
    fn center_ray_looks_forward() {
        let cam = camera();
        let ray = cam.ray_for(0.0, 0.0);
        assert_eq!(ray.origin, cam.position());
        assert_relative_eq!(ray.direction.dot(cam.forward()), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn corner_ray_follows_field_of_view() {
        let cam = Camera::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), Vec3A::Y, 90.0, 1.0);
        let ray = cam.ray_for(1.0, 1.0);
        // tan(45 deg) = 1, so the corner direction is (1, 1, -1) normalized.
        let expected = Vec3A::new(1.0, 1.0, -1.0).normalize();
        assert_relative_eq!(ray.direction.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(ray.direction.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(ray.direction.z, expected.z, epsilon = 1e-5);
    }
}
