//! Point light sources.

use glam::Vec3A;
use serde::{Deserialize, Serialize};

use crate::vector::Color;

/// Infinitely small light; shadows it casts are hard-edged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3A,
    /// Light color.
    pub color: Color,
    /// Scalar intensity; no distance falloff is applied.
    pub intensity: f32,
}

impl PointLight {
    /// Create a light. Negative intensities are clamped to zero.
    pub fn new(position: Vec3A, color: Color, intensity: f32) -> Self {
        Self { position, color, intensity: intensity.max(0.0) }
    }
}
