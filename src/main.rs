use anyhow::{Context, Result};
use clap::Parser;
use image::RgbaImage;
use log::info;

mod cli;
mod logger;

use cli::Args;
use glintray::output::{save_image_as_exr, save_image_as_png, OutputFormat};
use glintray::{FrameRenderer, RenderConfig};
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("Glintray - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let mut config = match &args.config {
        Some(path) => RenderConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            info!("No config given, rendering the demo scene");
            RenderConfig::default()
        }
    };
    args.apply_overrides(&mut config);
    config.validate().context("invalid configuration after command-line overrides")?;

    if let Some(path) = &args.write_config {
        config
            .save_to_file(path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        return Ok(());
    }

    // Fail on a bad extension before spending time rendering
    let format = OutputFormat::from_path(&args.output)?;

    let scene = config.build_scene();
    let camera = config.build_camera();
    let renderer = FrameRenderer::with_constants(
        &scene,
        &camera,
        config.options,
        config.shading,
        config.image.samples,
    );
    let (width, height) = (config.image.width, config.image.height);

    match format {
        OutputFormat::Png => {
            let mut image = RgbaImage::new(width, height);
            if args.parallel {
                renderer.render_parallel(&mut image);
            } else {
                renderer.render(&mut image);
            }
            save_image_as_png(&image, &args.output)
                .with_context(|| format!("failed to save {}", args.output.display()))?;
        }
        OutputFormat::Exr => {
            let (image, _stats) = renderer.render_hdr(width, height);
            save_image_as_exr(&image, &args.output)
                .with_context(|| format!("failed to save {}", args.output.display()))?;
        }
    }

    Ok(())
}
