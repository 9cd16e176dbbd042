//! Vector algebra for ray tracing.
//!
//! Arithmetic, dot/cross products, length and lerp come straight from glam's
//! `Vec3A`. This module adds the handful of optics helpers the shader needs:
//! a NaN-safe normalize, mirror reflection, Snell refraction and Schlick's
//! Fresnel approximation.

use glam::Vec3A;

/// 3D vector type using Vec3A for SIMD optimization.
pub type Vector3 = Vec3A;

/// Linear RGB color. Components are unclamped radiance values.
pub type Color = Vec3A;

/// Lengths below this are treated as zero by [`normalize`].
const MIN_LENGTH: f32 = 1e-12;

/// Normalize a vector, dividing by 1 instead of 0 for degenerate input.
///
/// A zero vector stays zero rather than turning into NaN.
pub fn normalize(v: Vector3) -> Vector3 {
    let len = v.length();
    if len > MIN_LENGTH {
        v / len
    } else {
        v
    }
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(incident: Vector3, normal: Vector3) -> Vector3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Refract a vector through an interface using Snell's law.
///
/// `normal` must face against `incident` and `eta` is the ratio n1/n2.
/// Returns `None` on total internal reflection.
pub fn refract(incident: Vector3, normal: Vector3, eta: f32) -> Option<Vector3> {
    let cos_i = (-incident.dot(normal)).clamp(-1.0, 1.0);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident + (eta * cos_i - k.sqrt()) * normal)
}

/// Compute Fresnel reflectance using Schlick's approximation.
///
/// `cos_angle` is the cosine between the view direction and the surface
/// normal on the incident side; `n1`/`n2` are the indices of refraction of the
/// incident and transmitting media.
pub fn schlick_fresnel(cos_angle: f32, n1: f32, n2: f32) -> f32 {
    let r0 = (n1 - n2) / (n1 + n2);
    let r0 = r0 * r0;
    let r = r0 + (1.0 - r0) * (1.0 - cos_angle).powi(5);
    r.clamp(0.0, 1.0)
}
