//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party crate types.
//! No engine fault is fatal to a run: configuration faults resolve to rules
//! that never match, cipher-domain faults fall back internally, and store
//! faults recover to an empty mapping with a distinguishable signal.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Mapping store errors
    #[error("Mapping store error: {0}")]
    Store(#[from] StoreError),

    /// Format-preserving cipher errors
    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Mapping-store-specific errors
///
/// A load failure is recovered locally (the store resets to empty), so these
/// surface through [`crate::core::store::LoadOutcome`] rather than aborting
/// a run. Write failures on `save()` are reported to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the store file
    #[error("Failed to read store file: {0}")]
    Read(String),

    /// Failed to write the store file
    #[error("Failed to write store file: {0}")]
    Write(String),

    /// File present but could not be decrypted or parsed
    #[error("Store integrity failure: {0}")]
    Integrity(String),

    /// Failed to serialize the mapping table
    #[error("Failed to serialize mapping table: {0}")]
    Serialization(String),
}

/// Format-preserving-cipher-specific errors
///
/// These never reach the engine API: a digit run outside the FF3 domain is
/// recovered locally with the substitution fallback.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Digit run too short or too long for the FF3 radix-10 domain
    #[error("Digit run of length {0} is outside the supported FF3 domain")]
    UnsupportedLength(usize),
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
