//! crates/healthtrack_core/src/error.rs
//!
//! The error type for the pure core operations (ranking, classification and
//! the triage assistant). Data-source failures use `PortError` instead.

/// Errors raised by the core when a caller passes input outside the
/// documented domain of an operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;
