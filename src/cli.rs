use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use glintray::RenderConfig;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "glintray")]
#[command(about = "A Whitted-style CPU ray tracer")]
pub struct Args {
    /// Render configuration (TOML); the built-in demo scene when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel, rounded up to a square grid
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum reflection/refraction depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Disable shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Disable reflection (and with it refraction)
    #[arg(long)]
    pub no_reflections: bool,

    /// Disable refraction through glass
    #[arg(long)]
    pub no_refraction: bool,

    /// Seed for rough-metal jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render rows in parallel across all CPU cores
    #[arg(long, short = 'p')]
    pub parallel: bool,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image.width = width;
        }
        if let Some(height) = self.height {
            config.image.height = height;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.image.samples = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.options.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            config.options.seed = seed;
        }
        if self.no_shadows {
            config.options.shadows = false;
        }
        if self.no_reflections {
            config.options.reflections = false;
        }
        if self.no_refraction {
            config.options.refraction = false;
        }
    }
}
