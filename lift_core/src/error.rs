//! Error types for the lift_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rounding tolerance was zero, negative, or finer than the weight grid
    #[error("Invalid rounding tolerance: {tolerance} (must be a positive multiple of 0.01)")]
    InvalidTolerance { tolerance: f64 },

    /// A plate entry with a non-positive weight or a zero count
    #[error("Invalid plate spec: weight {weight} x count {count} (weight must be a positive multiple of 0.01, count at least 1)")]
    InvalidPlateSpec { weight: f64, count: u32 },
}
