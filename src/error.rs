//! Error types for the fractalstream library.

use thiserror::Error;

/// Errors produced by the fractalstream library.
///
/// Negative lengths and non-string passwords are unrepresentable in the
/// public API (`usize`, `&str`); the remaining caller contract violations
/// are non-finite numeric inputs, which are rejected here instead of being
/// silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractalStreamError {
    /// Seed has a NaN or infinite component.
    #[error("seed components must be finite")]
    NonFiniteSeed,
    /// Magnitude cap is not a positive finite number.
    #[error("magnitude cap must be positive and finite")]
    InvalidMagnitudeCap,
    /// The observer requested cancellation before the full stream was produced.
    #[error("keystream generation cancelled before completion")]
    Cancelled,
    /// A report chart could not be rendered.
    #[error("failed to render chart: {0}")]
    Render(String),
}
