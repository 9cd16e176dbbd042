//! Material system for ray tracing.
//!
//! Four closed material variants: Lambert (diffuse with a Blinn-Phong
//! highlight), Metal (local shading blended with a possibly rough reflection),
//! Mirror (pure reflection) and Glass (Fresnel-weighted reflection and
//! refraction). Materials carry coefficients only; the tracer decides what to
//! do with them.

use serde::{Deserialize, Serialize};

use crate::error::MaterialError;
use crate::vector::Color;

/// Highlight strength used when shading the local term of a metal.
pub const METAL_SPECULAR_STRENGTH: f32 = 1.0;
/// Highlight exponent used when shading the local term of a metal.
pub const METAL_SHININESS: f32 = 64.0;

/// Surface material of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Material {
    /// Matte surface: Lambert diffuse plus a Blinn-Phong highlight.
    Lambert {
        /// Diffuse reflectance.
        color: Color,
        /// Weight of the Blinn-Phong highlight.
        specular_strength: f32,
        /// Blinn-Phong exponent; larger is a tighter highlight.
        shininess: f32,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color, also tints the reflection.
        color: Color,
        /// Fraction of the final color coming from the reflection.
        reflectivity: f32,
        /// Surface roughness (0.0 = mirror-sharp, 1.0 = rough).
        roughness: f32,
    },

    /// Perfect mirror with no local shading.
    Mirror {
        /// Fraction of the reflected color that is returned.
        reflectivity: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Glass {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        ior: f32,
        /// Color filter applied to transmitted light.
        tint: Color,
        /// Fraction of the refracted color that is transmitted.
        transparency: f32,
    },
}

impl Material {
    /// Plain matte material with a faint highlight.
    pub fn lambert(color: Color) -> Self {
        Material::Lambert { color, specular_strength: 0.3, shininess: 32.0 }
    }

    /// Diffuse color and Blinn-Phong `(strength, shininess)` for direct lighting.
    ///
    /// `None` for mirror and glass, which take all their color from recursion.
    pub fn local_shading(&self) -> Option<(Color, f32, f32)> {
        match *self {
            Material::Lambert { color, specular_strength, shininess } => {
                Some((color, specular_strength, shininess))
            }
            Material::Metal { color, .. } => Some((color, METAL_SPECULAR_STRENGTH, METAL_SHININESS)),
            Material::Mirror { .. } | Material::Glass { .. } => None,
        }
    }

    /// Copy of this material with its color replaced.
    ///
    /// Used for per-hit overrides such as checker floors. Mirrors have no
    /// color and are returned unchanged.
    pub fn with_color(&self, color: Color) -> Self {
        match *self {
            Material::Lambert { specular_strength, shininess, .. } => {
                Material::Lambert { color, specular_strength, shininess }
            }
            Material::Metal { reflectivity, roughness, .. } => {
                Material::Metal { color, reflectivity, roughness }
            }
            Material::Mirror { .. } => *self,
            Material::Glass { ior, transparency, .. } => {
                Material::Glass { ior, tint: color, transparency }
            }
        }
    }

    /// Check coefficient ranges, reporting the first problem.
    pub fn validate(&self) -> Result<(), MaterialError> {
        let unit = |name: &'static str, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(MaterialError::OutOfUnitRange { name, value })
            }
        };
        let non_negative = |name: &'static str, value: f32| {
            if value >= 0.0 {
                Ok(())
            } else {
                Err(MaterialError::Negative { name, value })
            }
        };
        match *self {
            Material::Lambert { specular_strength, shininess, .. } => {
                non_negative("specular_strength", specular_strength)?;
                non_negative("shininess", shininess)
            }
            Material::Metal { reflectivity, roughness, .. } => {
                unit("reflectivity", reflectivity)?;
                unit("roughness", roughness)
            }
            Material::Mirror { reflectivity } => unit("reflectivity", reflectivity),
            Material::Glass { ior, transparency, .. } => {
                if !(ior > 0.0) {
                    return Err(MaterialError::NonPositiveIor(ior));
                }
                unit("transparency", transparency)
            }
        }
    }
}
