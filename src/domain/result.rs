//! Result type alias for Veil operations

use super::errors::VeilError;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, VeilError>;
