//! Input error types.

use thiserror::Error;

/// Errors raised while validating frame input.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Non-finite pointer offset: ({x}, {y})")]
    NonFinitePointer { x: f64, y: f64 },
}
