//! Arena error types.

use thiserror::Error;

/// Errors raised by [`Config::validate`](crate::Config::validate).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("World {width}x{height} leaves no room inside a {margin} boundary margin")]
    WorldTooSmall { width: f64, height: f64, margin: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Initial chain length must be at least 1")]
    EmptyChain,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Aggressiveness range {min}..{max} must lie within 0..1")]
    Aggressiveness { min: f64, max: f64 },

    #[error("{field} range is inverted")]
    InvertedRange { field: &'static str },
}
