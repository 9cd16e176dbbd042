//! Glintray Whitted-style ray tracer
//!
//! Traces spheres and planes lit by point lights, with hard shadows,
//! Blinn-Phong highlights, recursive mirror and metal reflections and
//! Fresnel-weighted glass refraction. Frames are sampled on a stratified grid
//! and written as gamma-encoded RGBA8 or linear HDR.
//!
//! ```no_run
//! use glam::Vec3A;
//! use glintray::{render, Camera, Material, PointLight, RenderOptions, Scene, Sphere};
//! use image::RgbaImage;
//!
//! let mut scene = Scene::new();
//! scene
//!     .add_sphere(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0, Material::lambert(Vec3A::new(0.9, 0.1, 0.1))))
//!     .add_light(PointLight::new(Vec3A::new(2.0, 4.0, 0.0), Vec3A::ONE, 1.0));
//! let camera = Camera::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), Vec3A::Y, 60.0, 1.0);
//! let mut image = RgbaImage::new(64, 64);
//! render(&scene, &camera, &mut image, &RenderOptions::default(), 4);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod vector;
pub mod ray;
pub mod interval;
pub mod material;
pub mod hittable;
pub mod sphere;
pub mod plane;
pub mod light;
pub mod scene;
pub mod camera;
pub mod random;
pub mod tracer;
pub mod renderer;
pub mod config;
pub mod output;
pub mod error;

pub use camera::Camera;
pub use config::RenderConfig;
pub use error::{ConfigError, MaterialError, OutputError};
pub use hittable::{Hittable, HitRecord};
pub use light::PointLight;
pub use material::Material;
pub use plane::{Checker, Plane};
pub use ray::Ray;
pub use renderer::{render, FrameRenderer, RenderStats};
pub use scene::{Background, Scene};
pub use sphere::Sphere;
pub use tracer::{RenderOptions, ShadingConstants, TraceContext, Tracer};
pub use vector::{Color, Vector3};
