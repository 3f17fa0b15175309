// Veil - Deterministic field pseudonymization
// Copyright (c) 2026 Veil Contributors
// Licensed under the MIT License

//! # Veil - Deterministic, reversible field pseudonymization
//!
//! Veil replaces sensitive field values in structured documents with
//! realistic pseudonyms, deterministically: the same original value always
//! produces the same replacement, and every replacement can be reversed.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Matching** field identifiers against configured rules (exact codes
//!   or inclusive ranges)
//! - **Encrypting** numeric identifiers with a format-preserving cipher
//!   (FF3, radix 10), falling back to a keyed digit substitution for short
//!   runs
//! - **Generating** realistic, hash-seeded replacement names, addresses,
//!   phones, emails and jittered dates
//! - **Persisting** an encrypted bidirectional mapping table so that
//!   generated pseudonyms stay stable across runs and remain reversible
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (rules, cipher, generator, store, engine)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil::config::{load_config, secret_string};
//! use veil::core::engine::PseudonymizationEngine;
//! use veil::domain::Direction;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("veil.toml")?;
//!     let password = secret_string(std::env::var("VEIL_PASSWORD")?);
//!
//!     let mut engine = PseudonymizationEngine::new(&config, &password)?;
//!     let result = engine.transform("S21.G00.30.001", "1234567890123", Direction::Encrypt);
//!     println!("{}", result.value);
//!
//!     engine.save()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
