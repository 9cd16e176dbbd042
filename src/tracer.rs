//! Recursive Whitted-style shading.
//!
//! [`Tracer::trace`] finds the nearest hit, shades it with Blinn-Phong direct
//! lighting and hard shadows, and recurses for metal, mirror and glass
//! surfaces. Results are unclamped linear radiance; tone mapping belongs to the
//! frame renderer.

use glam::Vec3A;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::hittable::HitRecord;
use crate::interval::Interval;
use crate::material::Material;
use crate::random;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::{self, Color};

/// Feature switches read on every trace call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Test shadow rays against the scene.
    pub shadows: bool,
    /// Recurse for metal, mirror and glass.
    pub reflections: bool,
    /// Transmit through glass (needs `reflections`).
    pub refraction: bool,
    /// Deepest recursion level that still shades; deeper rays see the sky.
    pub max_depth: u32,
    /// Seed for the rough-metal jitter.
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { shadows: true, reflections: true, refraction: true, max_depth: 4, seed: 0 }
    }
}

/// Tunable constants of the shading model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConstants {
    /// Minimum hit distance and surface offset for secondary rays.
    pub epsilon: f32,
    /// Scale applied to summed direct lighting.
    pub ambient_compensation: f32,
    /// Weight of the jittered ray when blending rough-metal reflections.
    pub glossy_blend: f32,
    /// Jitter radius per unit of metal roughness.
    pub roughness_jitter: f32,
}

impl Default for ShadingConstants {
    fn default() -> Self {
        Self { epsilon: 1e-4, ambient_compensation: 0.9, glossy_blend: 0.5, roughness_jitter: 0.25 }
    }
}

/// Per-row mutable state: the jitter generator and ray counters.
#[derive(Debug, Clone)]
pub struct TraceContext {
    /// Generator for rough-metal jitter.
    pub rng: ChaCha20Rng,
    /// Number of `trace` calls, primary and secondary.
    pub rays_traced: u64,
    /// Number of shadow rays cast.
    pub shadow_rays: u64,
}

impl TraceContext {
    /// Context for render row `row` of a render seeded with `seed`.
    pub fn for_row(seed: u64, row: u32) -> Self {
        Self { rng: random::row_rng(seed, row), rays_traced: 0, shadow_rays: 0 }
    }

    /// Context seeded directly, for one-off traces.
    pub fn new(seed: u64) -> Self {
        Self::for_row(seed, 0)
    }
}

/// The shading algorithm bound to a scene and its options.
#[derive(Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    options: RenderOptions,
    constants: ShadingConstants,
}

impl<'a> Tracer<'a> {
    /// Tracer with the default shading constants.
    pub fn new(scene: &'a Scene, options: RenderOptions) -> Self {
        Self::with_constants(scene, options, ShadingConstants::default())
    }

    /// Tracer with explicit shading constants.
    pub fn with_constants(scene: &'a Scene, options: RenderOptions, constants: ShadingConstants) -> Self {
        Self { scene, options, constants }
    }

    /// Options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Scene being traced.
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Radiance arriving along `ray` at recursion level `depth`.
    pub fn trace(&self, ray: &Ray, depth: u32, ctx: &mut TraceContext) -> Color {
        ctx.rays_traced += 1;

        if depth > self.options.max_depth {
            return self.scene.sky(ray);
        }

        let Some(rec) = self.scene.nearest_hit(ray, Interval::from_min(self.constants.epsilon)) else {
            return self.scene.sky(ray);
        };

        let recurse = self.options.reflections;
        match rec.material {
            Material::Lambert { .. } => self.direct_lighting(ray, &rec, ctx),
            Material::Metal { color, reflectivity, roughness } => {
                let local = self.direct_lighting(ray, &rec, ctx);
                if !recurse {
                    return local;
                }
                let reflected = self.metal_reflection(ray, &rec, roughness, depth, ctx);
                local * (1.0 - reflectivity) + reflected * reflectivity * color
            }
            // Mirror and glass have no local term
            Material::Mirror { .. } | Material::Glass { .. } if !recurse => Color::ZERO,
            Material::Mirror { reflectivity } => self.mirror_reflection(ray, &rec, depth, ctx) * reflectivity,
            Material::Glass { ior, tint, transparency } => {
                self.glass(ray, &rec, ior, tint, transparency, depth, ctx)
            }
        }
    }

    /// Blinn-Phong lighting from every visible light.
    fn direct_lighting(&self, ray: &Ray, rec: &HitRecord, ctx: &mut TraceContext) -> Color {
        let Some((color, specular_strength, shininess)) = rec.material.local_shading() else {
            return Color::ZERO;
        };
        let eps = self.constants.epsilon;
        let n = rec.normal;
        let view = -vector::normalize(ray.direction);

        let mut sum = Color::ZERO;
        for light in self.scene.lights() {
            let to_light = light.position - rec.p;
            let dist = to_light.length();
            let l = vector::normalize(to_light);

            if self.options.shadows {
                // Nudge off the surface on the side facing the light
                let offset_normal = if n.dot(l) >= 0.0 { n } else { -n };
                let shadow_ray = Ray::new(rec.p + offset_normal * (2.0 * eps), l);
                ctx.shadow_rays += 1;
                if self.scene.occluded(&shadow_ray, Interval::new(eps, dist - eps)) {
                    continue;
                }
            }

            let radiance = light.color * light.intensity;
            let diffuse = color * n.dot(l).max(0.0) * radiance;
            let h = vector::normalize(l + view);
            let specular = n.dot(h).max(0.0).powf(shininess) * specular_strength * radiance;
            sum += diffuse + specular;
        }

        sum * self.constants.ambient_compensation
    }

    fn mirror_reflection(&self, ray: &Ray, rec: &HitRecord, depth: u32, ctx: &mut TraceContext) -> Color {
        let dir = vector::reflect(ray.direction, rec.normal);
        let origin = rec.p + rec.normal * self.constants.epsilon;
        self.trace(&Ray::new(origin, dir), depth + 1, ctx)
    }

    /// Sharp reflection, blended with one jittered ray for rough metals.
    fn metal_reflection(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        roughness: f32,
        depth: u32,
        ctx: &mut TraceContext,
    ) -> Color {
        let dir = vector::reflect(ray.direction, rec.normal);
        let origin = rec.p + rec.normal * self.constants.epsilon;
        let sharp = self.trace(&Ray::new(origin, dir), depth + 1, ctx);
        if roughness <= 0.0 {
            return sharp;
        }

        let jitter = random::random_unit_vector(&mut ctx.rng) * (roughness * self.constants.roughness_jitter);
        let rough_dir = vector::normalize(dir + jitter);
        let rough = self.trace(&Ray::new(origin, rough_dir), depth + 1, ctx);
        let blend = self.constants.glossy_blend;
        sharp * (1.0 - blend) + rough * blend
    }

    #[allow(clippy::too_many_arguments)]
    fn glass(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        ior: f32,
        tint: Color,
        transparency: f32,
        depth: u32,
        ctx: &mut TraceContext,
    ) -> Color {
        let eps = self.constants.epsilon;
        let d = vector::normalize(ray.direction);

        // Entering when travelling against the outward normal
        let (n, n1, n2) = if d.dot(rec.normal) < 0.0 {
            (rec.normal, 1.0, ior)
        } else {
            (-rec.normal, ior, 1.0)
        };

        let cos_view = (-d).dot(n).clamp(0.0, 1.0);
        let kr = vector::schlick_fresnel(cos_view, n1, n2);

        let reflect_dir = vector::reflect(d, n);
        let reflected = self.trace(&Ray::new(rec.p + n * eps, reflect_dir), depth + 1, ctx);

        if !self.options.refraction {
            return reflected * kr;
        }

        let refracted = match vector::refract(d, n, n1 / n2) {
            Some(dir) => {
                let transmitted = self.trace(&Ray::new(rec.p - n * eps, vector::normalize(dir)), depth + 1, ctx);
                transmitted * transparency * tint
            }
            None => Vec3A::ZERO,
        };

        reflected * kr + refracted * (1.0 - kr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::PointLight;
    use crate::plane::Plane;
    use crate::scene::Background;
    use crate::sphere::Sphere;
    use approx::assert_relative_eq;

    fn lit_floor(with_occluder: bool) -> Scene {
        let mut scene = Scene::new();
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Lambert { color: Vec3A::ONE, specular_strength: 0.5, shininess: 16.0 },
        ));
        if with_occluder {
            scene.add_sphere(Sphere::new(Vec3A::new(0.0, 2.5, 0.0), 0.5, Material::lambert(Vec3A::ONE)));
        }
        scene.add_light(PointLight::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::ONE, 1.0));
        scene
    }

    fn down_ray() -> Ray {
        Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn occluder_removes_direct_light() {
        let options = RenderOptions { shadows: true, ..RenderOptions::default() };

        let open = lit_floor(false);
        let lit = Tracer::new(&open, options).trace(&down_ray(), 0, &mut TraceContext::new(0));
        // diffuse 1 + specular 0.5, scaled by 0.9
        assert_relative_eq!(lit.x, 1.35, epsilon = 1e-4);

        let blocked = lit_floor(true);
        let shadowed = Tracer::new(&blocked, options).trace(&down_ray(), 0, &mut TraceContext::new(0));
        assert_eq!(shadowed, Vec3A::ZERO);

        let no_shadows = RenderOptions { shadows: false, ..options };
        let ignored = Tracer::new(&blocked, no_shadows).trace(&down_ray(), 0, &mut TraceContext::new(0));
        assert_relative_eq!(ignored.x, lit.x, epsilon = 1e-6);
    }

    #[test]
    fn depth_beyond_limit_returns_sky_without_recursing() {
        let mut scene = Scene::with_background(Background {
            top: Vec3A::new(0.1, 0.2, 0.9),
            bottom: Vec3A::new(0.9, 0.9, 0.9),
        });
        scene.add_sphere(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 1.0, Material::Mirror { reflectivity: 1.0 }));
        let options = RenderOptions { max_depth: 2, ..RenderOptions::default() };
        let tracer = Tracer::new(&scene, options);
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        let mut ctx = TraceContext::new(0);
        let color = tracer.trace(&ray, 3, &mut ctx);
        assert_eq!(color, scene.sky(&ray));
        assert_eq!(ctx.rays_traced, 1);
    }

    #[test]
    fn mirror_recursion_stops_at_max_depth() {
        // Two facing mirrors bounce forever without a depth cap.
        let mut scene = Scene::new();
        let mirror = Material::Mirror { reflectivity: 1.0 };
        scene
            .add_plane(Plane::new(Vec3A::new(0.0, 0.0, -1.0), Vec3A::Z, mirror))
            .add_plane(Plane::new(Vec3A::new(0.0, 0.0, 1.0), -Vec3A::Z, mirror));
        let options = RenderOptions { max_depth: 3, ..RenderOptions::default() };
        let mut ctx = TraceContext::new(0);
        Tracer::new(&scene, options).trace(&Ray::new(Vec3A::ZERO, -Vec3A::Z), 0, &mut ctx);
        // depths 0..=3 hit a mirror, depth 4 returns sky
        assert_eq!(ctx.rays_traced, 5);
    }

    #[test]
    fn glass_splits_energy_by_fresnel() {
        // Transparent glass floor over a uniformly white world: reflected and
        // transmitted rays both see white, so the result is kr + (1 - kr) = 1.
        let white = Background { top: Vec3A::ONE, bottom: Vec3A::ONE };
        let mut scene = Scene::with_background(white);
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Glass { ior: 1.5, tint: Vec3A::ONE, transparency: 1.0 },
        ));
        let tracer = Tracer::new(&scene, RenderOptions { max_depth: 1, ..RenderOptions::default() });
        for dir in [Vec3A::new(0.0, -1.0, 0.0), Vec3A::new(0.6, -0.8, 0.0), Vec3A::new(0.95, -0.3122, 0.0)] {
            let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), vector::normalize(dir));
            let c = tracer.trace(&ray, 0, &mut TraceContext::new(0));
            assert_relative_eq!(c.x, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn glass_without_refraction_keeps_only_fresnel_reflection() {
        let white = Background { top: Vec3A::ONE, bottom: Vec3A::ONE };
        let mut scene = Scene::with_background(white);
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Glass { ior: 1.5, tint: Vec3A::ONE, transparency: 1.0 },
        ));
        let options = RenderOptions { refraction: false, ..RenderOptions::default() };
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let c = Tracer::new(&scene, options).trace(&ray, 0, &mut TraceContext::new(0));
        assert_relative_eq!(c.x, vector::schlick_fresnel(1.0, 1.0, 1.5), epsilon = 1e-6);
    }

    #[test]
    fn smooth_metal_is_deterministic_and_blends_reflection() {
        let sky = Background { top: Vec3A::ONE, bottom: Vec3A::ONE };
        let mut scene = Scene::with_background(sky);
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Metal { color: Vec3A::new(1.0, 0.5, 0.25), reflectivity: 1.0, roughness: 0.0 },
        ));
        let tracer = Tracer::new(&scene, RenderOptions::default());
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::new(0.0, -1.0, 0.0));
        let a = tracer.trace(&ray, 0, &mut TraceContext::new(1));
        let b = tracer.trace(&ray, 0, &mut TraceContext::new(2));
        assert_eq!(a, b);
        // No lights, full reflectivity: sky tinted by the metal color
        assert_relative_eq!(a.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn total_internal_reflection_contributes_no_transmission() {
        // Ray inside a glass slab hitting the top face at a grazing angle.
        let sky = Background { top: Vec3A::ONE, bottom: Vec3A::ONE };
        let mut scene = Scene::with_background(sky);
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Glass { ior: 1.5, tint: Vec3A::ONE, transparency: 1.0 },
        ));
        let tracer = Tracer::new(&scene, RenderOptions { max_depth: 1, ..RenderOptions::default() });
        let ray = Ray::new(Vec3A::new(0.0, -1.0, 0.0), vector::normalize(Vec3A::new(1.0, 0.1, 0.0)));
        let c = tracer.trace(&ray, 0, &mut TraceContext::new(0));
        let cos_view = vector::normalize(Vec3A::new(1.0, 0.1, 0.0)).y;
        let kr = vector::schlick_fresnel(cos_view, 1.5, 1.0);
        assert_relative_eq!(c.x, kr, epsilon = 1e-5);
    }

    #[test]
    fn mirror_and_glass_are_black_without_reflections() {
        let glass = Material::Glass { ior: 1.5, tint: Vec3A::ONE, transparency: 1.0 };
        for material in [Material::Mirror { reflectivity: 1.0 }, glass] {
            let mut scene = Scene::new();
            scene
                .add_plane(Plane::new(Vec3A::ZERO, Vec3A::Y, material))
                .add_light(PointLight::new(Vec3A::new(0.0, 5.0, 0.0), Vec3A::ONE, 1.0));
            let options = RenderOptions { reflections: false, ..RenderOptions::default() };
            let mut ctx = TraceContext::new(0);
            let c = Tracer::new(&scene, options).trace(&down_ray(), 0, &mut ctx);
            assert_eq!(c, Vec3A::ZERO, "{material:?}");
            assert_eq!(ctx.shadow_rays, 0);
            assert_eq!(ctx.rays_traced, 1);
        }
    }

    fn rough_metal_trace(glossy_blend: f32, roughness: f32) -> Color {
        let sky = Background { top: Vec3A::new(0.1, 0.2, 0.9), bottom: Vec3A::new(0.9, 0.8, 0.7) };
        let mut scene = Scene::with_background(sky);
        scene.add_plane(Plane::new(
            Vec3A::ZERO,
            Vec3A::Y,
            Material::Metal { color: Vec3A::ONE, reflectivity: 1.0, roughness },
        ));
        let constants = ShadingConstants { glossy_blend, ..ShadingConstants::default() };
        let tracer = Tracer::with_constants(&scene, RenderOptions::default(), constants);
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 0.0), vector::normalize(Vec3A::new(0.6, -0.8, 0.0)));
        tracer.trace(&ray, 0, &mut TraceContext::new(7))
    }

    #[test]
    fn glossy_blend_weights_the_jittered_reflection() {
        let sharp = rough_metal_trace(0.5, 0.0);
        assert_eq!(rough_metal_trace(0.0, 1.0), sharp);

        // Same seed, so the jittered ray is identical across runs
        let rough = rough_metal_trace(1.0, 1.0);
        assert_ne!(rough, sharp);

        let half = rough_metal_trace(0.5, 1.0);
        let expected = sharp * 0.5 + rough * 0.5;
        assert_relative_eq!(half.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(half.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(half.z, expected.z, epsilon = 1e-6);
    }
}
