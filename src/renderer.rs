//! Frame renderer: pixel sampling, gamma correction and buffer output.
//!
//! Every pixel is traced independently. Rows are the unit of work: each row
//! owns a [`TraceContext`] seeded from the render seed and the row index, so
//! the single-threaded and row-parallel paths produce identical pixels.

use std::time::{Duration, Instant};

use image::{Rgb32FImage, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::scene::Scene;
use crate::tracer::{RenderOptions, ShadingConstants, TraceContext, Tracer};
use crate::vector::Color;

/// Display gamma used when encoding to 8 bits.
pub const GAMMA: f32 = 2.2;

/// Counters gathered over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Calls to the trace function, primary and secondary.
    pub rays_traced: u64,
    /// Shadow rays cast.
    pub shadow_rays: u64,
    /// Wall-clock time of the frame.
    pub elapsed: Duration,
}

impl RenderStats {
    fn absorb(&mut self, ctx: &TraceContext) {
        self.rays_traced += ctx.rays_traced;
        self.shadow_rays += ctx.shadow_rays;
    }
}

/// Renders a scene through a camera into pixel buffers.
pub struct FrameRenderer<'a> {
    tracer: Tracer<'a>,
    camera: &'a Camera,
    samples: u32,
}

impl<'a> FrameRenderer<'a> {
    /// Renderer with the default shading constants.
    pub fn new(scene: &'a Scene, camera: &'a Camera, options: RenderOptions, samples: u32) -> Self {
        Self::with_constants(scene, camera, options, ShadingConstants::default(), samples)
    }

    /// Renderer with explicit shading constants.
    pub fn with_constants(
        scene: &'a Scene,
        camera: &'a Camera,
        options: RenderOptions,
        constants: ShadingConstants,
        samples: u32,
    ) -> Self {
        Self {
            tracer: Tracer::with_constants(scene, options, constants),
            camera,
            samples,
        }
    }

    /// Sub-samples per axis: 1 for `samples <= 1`, else `ceil(sqrt(samples))`.
    pub fn grid_size(&self) -> u32 {
        if self.samples <= 1 {
            1
        } else {
            (self.samples as f32).sqrt().ceil() as u32
        }
    }

    /// Average linear radiance of pixel `(x, y)` in a `width x height` frame.
    ///
    /// Sub-samples sit at the centers of an `n x n` grid of sub-cells.
    pub fn sample_pixel(&self, x: u32, y: u32, width: u32, height: u32, ctx: &mut TraceContext) -> Color {
        let n = self.grid_size();
        let (w, h) = (width as f32, height as f32);
        let mut color = Color::ZERO;

        for sy in 0..n {
            for sx in 0..n {
                let px = x as f32 + (sx as f32 + 0.5) / n as f32;
                let py = y as f32 + (sy as f32 + 0.5) / n as f32;
                let u = (px / w) * 2.0 - 1.0;
                let v = (py / h) * 2.0 - 1.0;
                // Pixel rows grow downward, camera v grows upward
                let ray = self.camera.ray_for(u, -v);
                color += self.tracer.trace(&ray, 0, ctx);
            }
        }

        color / self.samples_per_pixel()
    }

    /// Number of sub-samples averaged per pixel, `grid_size()` squared.
    pub fn samples_per_pixel(&self) -> f32 {
        let n = self.grid_size() as f32;
        n * n
    }

    /// Render into `image` on the calling thread.
    pub fn render(&self, image: &mut RgbaImage) -> RenderStats {
        let (width, height) = image.dimensions();
        self.log_start(width, height);
        let start = Instant::now();
        let mut stats = RenderStats::default();

        let row_len = width as usize * 4;
        if row_len > 0 {
            for (y, row) in image.chunks_mut(row_len).enumerate() {
                let ctx = self.render_row(y as u32, width, height, row);
                stats.absorb(&ctx);
            }
        }

        stats.elapsed = start.elapsed();
        log_finish(&stats);
        stats
    }

    /// Render into `image` with one rayon task per row.
    ///
    /// Produces the same pixels as [`FrameRenderer::render`].
    pub fn render_parallel(&self, image: &mut RgbaImage) -> RenderStats {
        let (width, height) = image.dimensions();
        self.log_start(width, height);
        info!("Rendering on {} CPU threads...", rayon::current_num_threads());
        let start = Instant::now();

        let pb = ProgressBar::new(u64::from(height));
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}") {
            pb.set_style(style);
        }

        let row_len = width as usize * 4;
        let mut stats = RenderStats::default();
        if row_len > 0 {
            let contexts: Vec<TraceContext> = image
                .par_chunks_mut(row_len)
                .enumerate()
                .map(|(y, row)| {
                    let ctx = self.render_row(y as u32, width, height, row);
                    pb.inc(1);
                    ctx
                })
                .collect();
            for ctx in &contexts {
                stats.absorb(ctx);
            }
        }
        pb.finish_and_clear();

        stats.elapsed = start.elapsed();
        log_finish(&stats);
        stats
    }

    /// Render linear, unclamped radiance for HDR output.
    pub fn render_hdr(&self, width: u32, height: u32) -> (Rgb32FImage, RenderStats) {
        self.log_start(width, height);
        let start = Instant::now();
        let mut image = Rgb32FImage::new(width, height);

        let row_len = width as usize * 3;
        let mut stats = RenderStats::default();
        if row_len > 0 {
            let contexts: Vec<TraceContext> = image
                .par_chunks_mut(row_len)
                .enumerate()
                .map(|(y, row)| {
                    let y = y as u32;
                    let mut ctx = TraceContext::for_row(self.tracer.options().seed, y);
                    for (x, px) in row.chunks_exact_mut(3).enumerate() {
                        let c = self.sample_pixel(x as u32, y, width, height, &mut ctx);
                        px.copy_from_slice(&[c.x, c.y, c.z]);
                    }
                    ctx
                })
                .collect();
            for ctx in &contexts {
                stats.absorb(ctx);
            }
        }

        stats.elapsed = start.elapsed();
        log_finish(&stats);
        (image, stats)
    }

    fn render_row(&self, y: u32, width: u32, height: u32, row: &mut [u8]) -> TraceContext {
        let mut ctx = TraceContext::for_row(self.tracer.options().seed, y);
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            let color = self.sample_pixel(x as u32, y, width, height, &mut ctx);
            px.copy_from_slice(&encode_rgba8(color));
        }
        ctx
    }

    fn log_start(&self, width: u32, height: u32) {
        let options = self.tracer.options();
        let n = self.grid_size();
        info!("Rendering {}x{} with {}x{} samples per pixel", width, height, n, n);
        debug!(
            "Options: shadows={} reflections={} refraction={} max_depth={} seed={}",
            options.shadows, options.reflections, options.refraction, options.max_depth, options.seed
        );
        if self.tracer.scene().lights().is_empty() {
            warn!("Scene has no lights; only reflections of the sky will be visible");
        }
    }
}

fn log_finish(stats: &RenderStats) {
    info!(
        "Frame rendered in {:.2?} ({} rays, {} shadow rays)",
        stats.elapsed, stats.rays_traced, stats.shadow_rays
    );
}

/// Gamma-encode one linear channel to 8 bits.
pub fn encode_channel(linear: f32) -> u8 {
    let gamma = linear.max(0.0).powf(1.0 / GAMMA).clamp(0.0, 1.0);
    (gamma * 255.0).round() as u8
}

/// Gamma-encode a linear color to opaque RGBA8.
pub fn encode_rgba8(color: Color) -> [u8; 4] {
    [encode_channel(color.x), encode_channel(color.y), encode_channel(color.z), 255]
}

/// Render `scene` through `camera` into `image` on the calling thread.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    image: &mut RgbaImage,
    options: &RenderOptions,
    samples: u32,
) -> RenderStats {
    FrameRenderer::new(scene, camera, *options, samples).render(image)
}
