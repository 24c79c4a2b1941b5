//! # Configuration Errors
//!
//! Everything that can stop the world from starting.
//!
//! Generation itself never fails: missing templates, exhausted placement
//! budgets and terrain query failures are all handled in place. Degenerate
//! configuration, on the other hand, is rejected up front so that no
//! division by zero or unbounded loop can happen mid-generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::WorldConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Chunk size is zero, negative or not finite.
    #[error("chunk size must be a positive finite number, got {0}")]
    InvalidChunkSize(f32),

    /// The unload radius does not enclose the view radius.
    #[error("unload distance {unload} must be greater than view distance {view}")]
    UnloadInsideView {
        /// Configured view distance in chunks.
        view: u32,
        /// Configured unload distance in chunks.
        unload: f32,
    },

    /// A value is NaN or infinite.
    #[error("{field} must be finite")]
    NotFinite {
        /// Dotted path of the offending field.
        field: &'static str,
    },

    /// A value that must be strictly positive is not.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A value that must be non-negative is not.
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A value falls outside its allowed interval.
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// A `{ min, max }` range has `min > max`.
    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        /// Dotted path of the offending range.
        field: &'static str,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// The city grid does not fit inside one chunk.
    #[error("city footprint {footprint} exceeds chunk size {chunk_size}")]
    CityTooLarge {
        /// Side length of the city grid.
        footprint: f32,
        /// Configured chunk size.
        chunk_size: f32,
    },

    /// A count is below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// Minimum accepted value.
        min: u64,
    },

    /// A count or radius is above its maximum.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// Maximum accepted value.
        max: u64,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
