//! Scene container: primitives, point lights and the sky gradient.
//!
//! A scene is assembled once with the `add_*` builder methods and is then
//! only read while tracing.

use glam::Vec3A;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::hittable::{Hittable, HitRecord, HittableList};
use crate::interval::Interval;
use crate::light::PointLight;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::vector::{self, Color};

/// Two-color sky returned for rays that escape all geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Color straight up (zenith).
    pub top: Color,
    /// Color straight down; the horizon sits halfway between the two.
    pub bottom: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            top: Color::new(0.5, 0.7, 1.0),
            bottom: Color::new(1.0, 1.0, 1.0),
        }
    }
}

impl Background {
    /// Sky color seen along `direction`.
    ///
    /// Blends bottom to top by `0.5 * (dir.y + 1)` of the unit direction.
    pub fn color(&self, direction: Vec3A) -> Color {
        let unit_direction = vector::normalize(direction);
        let a = 0.5 * (unit_direction.y + 1.0);
        self.bottom.lerp(self.top, a)
    }
}

/// Primitives, lights and background of one render.
#[derive(Default)]
pub struct Scene {
    objects: HittableList,
    lights: Vec<PointLight>,
    /// Sky gradient for escaped rays.
    pub background: Background,
}

impl Scene {
    /// Create an empty scene with the default sky.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given sky.
    pub fn with_background(background: Background) -> Self {
        Self { background, ..Self::default() }
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, sphere: Sphere) -> &mut Self {
        debug!("Scene: sphere at {} r={}", sphere.center, sphere.radius);
        self.objects.add(Box::new(sphere));
        self
    }

    /// Add a plane.
    pub fn add_plane(&mut self, plane: Plane) -> &mut Self {
        debug!("Scene: plane through {} n={}", plane.point, plane.normal);
        self.objects.add(Box::new(plane));
        self
    }

    /// Add any other hittable object.
    pub fn add_object(&mut self, object: Box<dyn Hittable>) -> &mut Self {
        self.objects.add(object);
        self
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: PointLight) -> &mut Self {
        debug!("Scene: light at {} intensity={}", light.position, light.intensity);
        self.lights.push(light);
        self
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Number of primitives.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Nearest intersection within `ray_t`. Ties go to the earliest inserted primitive.
    pub fn nearest_hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.objects.hit(r, ray_t)
    }

    /// True if any primitive blocks the ray within `ray_t`.
    pub fn occluded(&self, r: &Ray, ray_t: Interval) -> bool {
        self.objects.any_hit(r, ray_t)
    }

    /// Sky color for a ray that hit nothing.
    pub fn sky(&self, r: &Ray) -> Color {
        self.background.color(r.direction)
    }
}
