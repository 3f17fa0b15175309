//! Core domain types and models
//!
//! This module contains the error hierarchy and the value types shared by the
//! engine components: field rules, transformation kinds, locales and the
//! transform direction.

pub mod errors;
pub mod result;
pub mod rule;

pub use errors::{CipherError, StoreError, VeilError};
pub use result::Result;
pub use rule::{Direction, FieldRule, Locale, TransformationKind};
