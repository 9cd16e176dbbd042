//! Error types for configuration loading and image output.
//!
//! Tracing itself cannot fail; these cover the file-facing edges of the crate.

/// Errors while reading, writing or validating a render configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A primitive carries a material with out-of-range coefficients
    #[error("Invalid configuration: {owner}: {source}")]
    Material {
        /// Which primitive, e.g. "sphere 2"
        owner: String,
        /// What is wrong with its material
        #[source]
        source: MaterialError,
    },
}

/// Material coefficients outside their allowed range.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// Coefficient must lie within [0, 1]
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Coefficient must not be negative
    #[error("{name} must be >= 0, got {value}")]
    Negative {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// Index of refraction must be positive
    #[error("ior must be > 0, got {0}")]
    NonPositiveIor(f32),
}

/// Errors while writing a rendered image.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// PNG encoding or file error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// OpenEXR encoding or file error
    #[error("EXR error: {0}")]
    Exr(#[from] exr::error::Error),

    /// File extension is neither .png nor .exr
    #[error("Unsupported file extension '{0}'. Only .png and .exr formats are supported.")]
    UnsupportedExtension(String),
}
