//! Configuration management
//!
//! TOML-backed configuration with environment variable substitution and
//! secrecy-wrapped password handling. The engine consumes an already parsed
//! and validated [`VeilConfig`]; nothing in `core` reads files or the
//! environment.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{ApplicationConfig, FpeConfig, PseudonymConfig, StoreConfig, VeilConfig};
pub use secret::{secret_string, SecretString, SecretValue};
