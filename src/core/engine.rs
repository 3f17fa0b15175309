//! Pseudonymization engine
//!
//! [`PseudonymizationEngine`] ties the rule set, the format-preserving
//! cipher, the pseudonym generator and the mapping store together behind a
//! single [`transform`](PseudonymizationEngine::transform) call. Callers
//! (the document walker, the CLI) hand it a field identifier, a value and a
//! direction; the engine decides whether the field is in scope and what to
//! do with it.
//!
//! Determinism is enforced here, not in the primitives: before generating
//! anything, the engine consults the store for an existing mapping under
//! the field's category, so even a cipher whose output is not intrinsically
//! deterministic would stay stable across a run.

use crate::config::VeilConfig;
use crate::config::SecretString;
use crate::core::fpe::FormatPreservingCipher;
use crate::core::keys::KeyMaterial;
use crate::core::pseudonym::PseudonymGenerator;
use crate::core::rules::RuleSet;
use crate::core::store::{LoadOutcome, MappingStore};
use crate::domain::{Direction, Result, TransformationKind};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Result of a single field transformation
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The transformed (or passed-through) value
    pub value: String,
    /// Mapping category (`field_identifier:kind`) when a rule matched
    pub category: Option<String>,
    /// Whether a rule matched the field identifier
    pub matched: bool,
    /// Decrypt only: a rule matched but no mapping (or inversion) recovered
    /// the original, so the value was returned as-is
    pub mapping_missing: bool,
}

impl TransformResult {
    fn passthrough(value: &str) -> Self {
        Self {
            value: value.to_string(),
            category: None,
            matched: false,
            mapping_missing: false,
        }
    }
}

/// Counters accumulated across [`transform`](PseudonymizationEngine::transform)
/// calls within one engine lifetime
#[derive(Debug, Default, Clone, Serialize)]
pub struct EngineStats {
    /// Every value the engine was asked to look at
    pub total_fields: u64,
    /// Values a rule matched and the engine actually rewrote
    pub transformed_fields: u64,
    /// Transformed field count per transformation kind
    pub by_kind: HashMap<TransformationKind, u64>,
}

/// Orchestrator for rule matching, transformation and mapping persistence
pub struct PseudonymizationEngine {
    rules: RuleSet,
    cipher: FormatPreservingCipher,
    generator: PseudonymGenerator,
    store: MappingStore,
    stats: EngineStats,
    load_outcome: LoadOutcome,
    default_variance_days: u32,
}

impl PseudonymizationEngine {
    /// Build an engine from validated configuration and the operator
    /// password. Derives both working keys once, then loads any previously
    /// persisted mappings.
    pub fn new(config: &VeilConfig, password: &SecretString) -> Result<Self> {
        let keys = KeyMaterial::derive(password);
        let cipher = FormatPreservingCipher::new(keys.fpe_key(), &config.fpe.tweak);
        let generator = PseudonymGenerator::new(config.pseudonym.locale);
        let mut store = MappingStore::new(&config.store.path, keys.store_key());

        let load_outcome = store.load();
        match load_outcome {
            LoadOutcome::Fresh => {
                tracing::debug!(path = %config.store.path, "Starting with a fresh mapping store");
            }
            LoadOutcome::Loaded(entries) => {
                tracing::info!(path = %config.store.path, entries, "Mapping store loaded");
            }
            LoadOutcome::IntegrityFailure => {
                tracing::warn!(
                    path = %config.store.path,
                    "Existing mapping store could not be decrypted; previously \
                     issued pseudonyms for generator-backed fields are not reversible"
                );
            }
        }

        Ok(Self {
            rules: RuleSet::new(config.rules.clone()),
            cipher,
            generator,
            store,
            stats: EngineStats::default(),
            load_outcome,
            default_variance_days: config.pseudonym.date_variance_days,
        })
    }

    /// How the persisted store was (or was not) recovered at startup
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Transform one field value in the requested direction.
    ///
    /// Unmatched fields pass through unchanged and are not counted as
    /// transformed. Blank values short-circuit even for matched fields.
    pub fn transform(
        &mut self,
        field_identifier: &str,
        value: &str,
        direction: Direction,
    ) -> TransformResult {
        self.stats.total_fields += 1;

        let Some(rule) = self.rules.match_field(field_identifier).cloned() else {
            return TransformResult::passthrough(value);
        };

        if value.trim().is_empty() {
            return TransformResult {
                value: value.to_string(),
                category: Some(category_for(field_identifier, rule.kind)),
                matched: true,
                mapping_missing: false,
            };
        }

        let category = category_for(field_identifier, rule.kind);
        match direction {
            Direction::Encrypt => {
                let transformed = self.encrypt_value(&category, value, &rule);
                self.stats.transformed_fields += 1;
                *self.stats.by_kind.entry(rule.kind).or_insert(0) += 1;
                TransformResult {
                    value: transformed,
                    category: Some(category),
                    matched: true,
                    mapping_missing: false,
                }
            }
            Direction::Decrypt => self.decrypt_value(&category, value, &rule),
        }
    }

    fn encrypt_value(
        &mut self,
        category: &str,
        value: &str,
        rule: &crate::domain::FieldRule,
    ) -> String {
        // Store-first: an existing mapping wins over re-derivation, keeping
        // output stable even across cipher or generator changes.
        if let Some(existing) = self.store.get(category, value) {
            return existing.to_string();
        }

        let transformed = match rule.kind {
            TransformationKind::FormatPreservingNumeric => self.cipher.encrypt(value),
            TransformationKind::PersonName => self.generator.person_name(value, rule.locale),
            TransformationKind::Street => self.generator.street(value, rule.locale),
            TransformationKind::City => self.generator.city(value, rule.locale),
            TransformationKind::PostalCode => self.generator.postal_code(value, rule.locale),
            TransformationKind::Phone => self.generator.phone(value, rule.locale),
            TransformationKind::Email => self.generator.email(value, rule.locale),
            TransformationKind::Company => self.generator.company(value, rule.locale),
            TransformationKind::DateWithVariance => {
                // A rule without its own window uses the configured default.
                let variance = rule
                    .date_variance_days
                    .unwrap_or(self.default_variance_days);
                self.generator.date(value, variance)
            }
        };

        self.store.put(category, value, &transformed);
        transformed
    }

    fn decrypt_value(
        &mut self,
        category: &str,
        value: &str,
        rule: &crate::domain::FieldRule,
    ) -> TransformResult {
        if let Some(original) = self.store.reverse(category, value).map(str::to_string) {
            self.stats.transformed_fields += 1;
            *self.stats.by_kind.entry(rule.kind).or_insert(0) += 1;
            return TransformResult {
                value: original,
                category: Some(category.to_string()),
                matched: true,
                mapping_missing: false,
            };
        }

        // The numeric cipher is invertible without the table.
        if rule.kind == TransformationKind::FormatPreservingNumeric {
            self.stats.transformed_fields += 1;
            *self.stats.by_kind.entry(rule.kind).or_insert(0) += 1;
            return TransformResult {
                value: self.cipher.decrypt(value),
                category: Some(category.to_string()),
                matched: true,
                mapping_missing: false,
            };
        }

        tracing::warn!(category, "No mapping found for value during decryption");
        TransformResult {
            value: value.to_string(),
            category: Some(category.to_string()),
            matched: true,
            mapping_missing: true,
        }
    }

    /// Persist the mapping store to disk.
    pub fn save(&self) -> Result<()> {
        self.store.save()
    }

    /// Engine counters for the current run
    pub fn statistics(&self) -> &EngineStats {
        &self.stats
    }

    /// Mapping store entry counts per category
    pub fn store_statistics(&self) -> BTreeMap<String, usize> {
        self.store.get_statistics()
    }

    /// Write the mapping table as plaintext JSON for authorized review.
    pub fn export_mapping(&self, output_path: &Path) -> Result<()> {
        self.store.export_plaintext(output_path)
    }
}

fn category_for(field_identifier: &str, kind: TransformationKind) -> String {
    format!("{field_identifier}:{kind}")
}
