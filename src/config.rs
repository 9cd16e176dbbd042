//! Render configuration loaded from TOML.
//!
//! A configuration file describes everything one frame needs: image size,
//! camera, feature switches, shading constants and the scene itself. Every
//! section is optional; missing sections fall back to the built-in demo.
//!
//! ```toml
//! [image]
//! width = 640
//! height = 360
//! samples = 4
//!
//! [camera]
//! lookfrom = [0.0, 1.0, 5.0]
//! lookat = [0.0, 0.0, 0.0]
//!
//! [[scene.spheres]]
//! center = [0.0, 0.0, 0.0]
//! radius = 1.0
//! material = { type = "lambert", color = [0.9, 0.1, 0.1], specular_strength = 0.4, shininess = 32.0 }
//!
//! [[scene.lights]]
//! position = [3.0, 5.0, 4.0]
//! color = [1.0, 1.0, 1.0]
//! intensity = 1.0
//! ```

use std::path::Path;

use glam::Vec3A;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::ConfigError;
use crate::light::PointLight;
use crate::material::Material;
use crate::plane::{Checker, Plane};
use crate::scene::{Background, Scene};
use crate::sphere::Sphere;
use crate::tracer::{RenderOptions, ShadingConstants};

/// Output image size and anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel, rounded up to a square grid
    pub samples: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self { width: 800, height: 450, samples: 4 }
    }
}

/// Camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// World "up" direction
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::new(0.0, 1.2, 6.0),
            lookat: Vec3A::new(0.0, 0.3, 0.0),
            vup: Vec3A::Y,
            vfov: 50.0,
        }
    }
}

/// A sphere entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    /// Center point
    pub center: Vec3A,
    /// Radius, must not be negative
    pub radius: f32,
    /// Surface material
    pub material: Material,
}

/// A plane entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Any point on the plane
    pub point: Vec3A,
    /// Plane normal, need not be unit length
    pub normal: Vec3A,
    /// Surface material
    pub material: Material,
    /// Optional checkerboard color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker: Option<Checker>,
}

/// Primitives, lights and sky.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Sky gradient
    pub background: Background,
    /// Spheres, in insertion order
    pub spheres: Vec<SphereConfig>,
    /// Planes, in insertion order
    pub planes: Vec<PlaneConfig>,
    /// Point lights
    pub lights: Vec<PointLight>,
}

impl SceneConfig {
    /// Checker floor with a lambert, a metal, a mirror and a glass sphere.
    pub fn demo() -> Self {
        Self {
            background: Background {
                top: Vec3A::new(0.35, 0.55, 0.95),
                bottom: Vec3A::new(0.95, 0.95, 1.0),
            },
            spheres: vec![
                SphereConfig {
                    center: Vec3A::new(0.0, 0.0, 0.0),
                    radius: 1.0,
                    material: Material::Lambert {
                        color: Vec3A::new(0.9, 0.15, 0.1),
                        specular_strength: 0.5,
                        shininess: 48.0,
                    },
                },
                SphereConfig {
                    center: Vec3A::new(-2.2, -0.2, -0.8),
                    radius: 0.8,
                    material: Material::Metal {
                        color: Vec3A::new(1.0, 0.78, 0.34),
                        reflectivity: 0.75,
                        roughness: 0.15,
                    },
                },
                SphereConfig {
                    center: Vec3A::new(2.2, -0.2, -0.8),
                    radius: 0.8,
                    material: Material::Mirror { reflectivity: 0.9 },
                },
                SphereConfig {
                    center: Vec3A::new(0.9, -0.55, 1.6),
                    radius: 0.45,
                    material: Material::Glass {
                        ior: 1.5,
                        tint: Vec3A::new(0.95, 1.0, 0.97),
                        transparency: 0.95,
                    },
                },
            ],
            planes: vec![PlaneConfig {
                point: Vec3A::new(0.0, -1.0, 0.0),
                normal: Vec3A::Y,
                material: Material::Lambert {
                    color: Vec3A::ONE,
                    specular_strength: 0.1,
                    shininess: 16.0,
                },
                checker: Some(Checker::new(1.0, Vec3A::new(0.9, 0.9, 0.9), Vec3A::new(0.15, 0.15, 0.18))),
            }],
            lights: vec![
                PointLight::new(Vec3A::new(4.0, 6.0, 5.0), Vec3A::new(1.0, 0.97, 0.9), 0.9),
                PointLight::new(Vec3A::new(-5.0, 4.0, 2.0), Vec3A::new(0.6, 0.7, 1.0), 0.4),
            ],
        }
    }
}

fn demo_scene() -> SceneConfig {
    SceneConfig::demo()
}

/// Everything needed to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output size and sampling
    pub image: ImageConfig,
    /// Camera placement
    pub camera: CameraConfig,
    /// Feature switches and recursion depth
    pub options: RenderOptions,
    /// Shading constants
    pub shading: ShadingConstants,
    /// Scene contents; the demo scene when the section is absent
    #[serde(default = "demo_scene")]
    pub scene: SceneConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            camera: CameraConfig::default(),
            options: RenderOptions::default(),
            shading: ShadingConstants::default(),
            scene: SceneConfig::demo(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "Loaded config {} ({} spheres, {} planes, {} lights)",
            path.display(),
            config.scene.spheres.len(),
            config.scene.planes.len(),
            config.scene.lights.len()
        );
        Ok(config)
    }

    /// Write this configuration as TOML.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!("Config written to {}", path.display());
        Ok(())
    }

    /// Reject values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.image.width == 0 || self.image.height == 0 {
            return invalid(format!("image size must be non-zero, got {}x{}", self.image.width, self.image.height));
        }

        let cam = &self.camera;
        if !(cam.vfov > 0.0 && cam.vfov < 180.0) {
            return invalid(format!("camera vfov must be within (0, 180) degrees, got {}", cam.vfov));
        }
        let forward = cam.lookat - cam.lookfrom;
        if forward.length_squared() == 0.0 {
            return invalid("camera lookat must differ from lookfrom".to_string());
        }
        if forward.cross(cam.vup).length_squared() == 0.0 {
            return invalid("camera vup must not be parallel to the view direction".to_string());
        }

        if !(self.shading.epsilon > 0.0) {
            return invalid(format!("shading epsilon must be > 0, got {}", self.shading.epsilon));
        }

        for (i, s) in self.scene.spheres.iter().enumerate() {
            if !(s.radius >= 0.0) {
                return invalid(format!("sphere {i}: radius must be >= 0, got {}", s.radius));
            }
            s.material
                .validate()
                .map_err(|source| ConfigError::Material { owner: format!("sphere {i}"), source })?;
        }

        for (i, p) in self.scene.planes.iter().enumerate() {
            if p.normal.length_squared() == 0.0 {
                return invalid(format!("plane {i}: normal must be non-zero"));
            }
            if let Some(checker) = &p.checker {
                if !(checker.scale > 0.0) {
                    return invalid(format!("plane {i}: checker scale must be > 0, got {}", checker.scale));
                }
            }
            p.material
                .validate()
                .map_err(|source| ConfigError::Material { owner: format!("plane {i}"), source })?;
        }

        for (i, l) in self.scene.lights.iter().enumerate() {
            if !(l.intensity >= 0.0) {
                return invalid(format!("light {i}: intensity must be >= 0, got {}", l.intensity));
            }
        }

        Ok(())
    }

    /// Build the scene described by this configuration.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::with_background(self.scene.background);
        for s in &self.scene.spheres {
            scene.add_sphere(Sphere::new(s.center, s.radius, s.material));
        }
        for p in &self.scene.planes {
            let mut plane = Plane::new(p.point, p.normal, p.material);
            if let Some(checker) = p.checker {
                plane = plane.with_checker(checker);
            }
            scene.add_plane(plane);
        }
        for l in &self.scene.lights {
            scene.add_light(*l);
        }
        debug!("Scene built: {} objects, {} lights", scene.object_count(), scene.lights().len());
        scene
    }

    /// Build the camera, using the image aspect ratio.
    pub fn build_camera(&self) -> Camera {
        let aspect_ratio = self.image.width as f32 / self.image.height.max(1) as f32;
        Camera::new(self.camera.lookfrom, self.camera.lookat, self.camera.vup, self.camera.vfov, aspect_ratio)
    }
}
