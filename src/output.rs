//! # Output Module
//!
//! Writes rendered frames to disk:
//! - PNG from the gamma-encoded RGBA8 buffer
//! - OpenEXR from linear HDR radiance, without tone mapping or gamma
//!
//! The format is picked from the output path's extension.

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{Rgb32FImage, RgbaImage};
use log::info;

use crate::error::OutputError;

/// Image container chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 8-bit gamma-encoded PNG
    Png,
    /// 32-bit float linear OpenEXR
    Exr,
}

impl OutputFormat {
    /// Pick the format from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, OutputError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "exr" => Ok(OutputFormat::Exr),
            _ => Err(OutputError::UnsupportedExtension(ext)),
        }
    }
}

/// Save an RGBA8 frame as PNG.
pub fn save_image_as_png(image: &RgbaImage, output_path: &Path) -> Result<(), OutputError> {
    image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save a linear f32 RGB frame as EXR with full HDR precision.
///
/// Values are written as-is: no clamping, no gamma.
pub fn save_image_as_exr(image: &Rgb32FImage, output_path: &Path) -> Result<(), OutputError> {
    let (width, height) = image.dimensions();
    write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::from_path(&PathBuf::from("out.png")).ok(), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(&PathBuf::from("a/b/OUT.EXR")).ok(), Some(OutputFormat::Exr));
        assert!(matches!(
            OutputFormat::from_path(&PathBuf::from("out.jpg")),
            Err(OutputError::UnsupportedExtension(ext)) if ext == "jpg"
        ));
        assert!(OutputFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frame.png");
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
        save_image_as_png(&image, &path).expect("save png");
        let loaded = image::open(&path).expect("open png").to_rgba8();
        assert_eq!(loaded, image);
    }
}
