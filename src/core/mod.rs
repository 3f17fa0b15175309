//! Core pseudonymization engine and its building blocks

pub mod engine;
pub mod fpe;
pub mod keys;
pub mod pseudonym;
pub mod rules;
pub mod store;

pub use engine::{EngineStats, PseudonymizationEngine, TransformResult};
pub use store::LoadOutcome;
