//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and HitRecord for
//! storing intersection data.

use glam::Vec3A;
use crate::ray::Ray;
use crate::interval::Interval;
use crate::material::Material;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and material data
/// needed for shading calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Geometric outward normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material at the hit point, including any per-hit color override
    pub material: Material,
}

impl HitRecord {
    /// Build a hit record, recording which face the ray arrived on.
    ///
    /// The normal is kept outward-facing; the glass shader inspects the sign
    /// of `ray.direction . normal` itself.
    pub fn new(r: &Ray, t: f32, outward_normal: Vec3A, material: Material) -> Self {
        Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: r.direction.dot(outward_normal) < 0.0,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so a scene can be shared by the
/// row-parallel renderer.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the nearest hit with `t` inside `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through Box<dyn Hittable>.
#[derive(Default)]
pub struct HittableList {
    /// Boxed hittable objects, in insertion order
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the list.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the list holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// True if anything intersects the ray within `ray_t`.
    ///
    /// Stops at the first hit; used for shadow rays.
    pub fn any_hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.objects.iter().any(|object| object.hit(r, ray_t).is_some())
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        // Strictly-nearer hits replace the current one, so on equal t the
        // earliest inserted object wins.
        for object in &self.objects {
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                if closest.map_or(true, |c| rec.t < c.t) {
                    closest_so_far = rec.t;
                    closest = Some(rec);
                }
            }
        }

        closest
    }
}
