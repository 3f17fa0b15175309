//! Rule matching for field identifiers
//!
//! Field identifiers are dotted (or underscored) structural codes such as
//! `S21.G00.30.001`; only the trailing two numeric segments carry meaning for
//! rule matching, the prefix is namespace information. [`RuleSet`] resolves an
//! identifier to the first rule whose pattern matches, in declaration order.

use crate::domain::FieldRule;
use regex::Regex;

/// An ordered collection of field rules with first-match-wins resolution
pub struct RuleSet {
    rules: Vec<FieldRule>,
    suffix_re: Regex,
}

impl RuleSet {
    /// Build a rule set. Order is significant and preserved.
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self {
            rules,
            // Trailing `NN.NNN` code preceded by a separator.
            suffix_re: Regex::new(r"\.(\d+\.\d+)$").expect("static regex"),
        }
    }

    /// Resolve a field identifier to the first matching rule, if any.
    ///
    /// Identifiers without a trailing `NN.NNN` code never match. Overlapping
    /// rules are a configuration hazard, not an error: the first one in
    /// declaration order wins.
    pub fn match_field(&self, field_identifier: &str) -> Option<&FieldRule> {
        let code = self.extract_code(field_identifier)?;
        self.rules.iter().find(|rule| rule.matches_code(&code))
    }

    /// Number of configured rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Extract the significant trailing code from an identifier.
    ///
    /// Underscore-separated identifiers are normalized to dots first, so
    /// `S21_G00_30_001` resolves like `S21.G00.30.001`.
    fn extract_code(&self, field_identifier: &str) -> Option<String> {
        let normalized = field_identifier.replace('_', ".");
        self.suffix_re
            .captures(&normalized)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransformationKind;

    fn rule(pattern: &str, kind: TransformationKind) -> FieldRule {
        FieldRule {
            pattern: pattern.to_string(),
            kind,
            locale: None,
            date_variance_days: None,
        }
    }

    #[test]
    fn test_match_exact_pattern() {
        let rules = RuleSet::new(vec![rule(
            "30.001",
            TransformationKind::FormatPreservingNumeric,
        )]);
        let matched = rules.match_field("S21.G00.30.001").unwrap();
        assert_eq!(matched.kind, TransformationKind::FormatPreservingNumeric);
    }

    #[test]
    fn test_match_range_pattern() {
        let rules = RuleSet::new(vec![rule("30.001-30.010", TransformationKind::Street)]);
        assert!(rules.match_field("S21.G00.30.005").is_some());
        assert!(rules.match_field("S21.G00.30.011").is_none());
    }

    #[test]
    fn test_range_requires_same_first_segment() {
        let rules = RuleSet::new(vec![rule("30.001-30.010", TransformationKind::Street)]);
        assert!(rules.match_field("S21.G00.40.005").is_none());
    }

    #[test]
    fn test_identifier_without_code_suffix() {
        let rules = RuleSet::new(vec![rule(
            "30.001",
            TransformationKind::FormatPreservingNumeric,
        )]);
        assert!(rules.match_field("comment").is_none());
        assert!(rules.match_field("").is_none());
    }

    #[test]
    fn test_underscored_identifier_normalized() {
        let rules = RuleSet::new(vec![rule("30.001", TransformationKind::PersonName)]);
        assert!(rules.match_field("S21_G00_30_001").is_some());
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::new(vec![
            rule("30.001-30.010", TransformationKind::City),
            rule("30.005", TransformationKind::Phone),
        ]);
        // 30.005 is inside the range declared first.
        let matched = rules.match_field("S10.G00.30.005").unwrap();
        assert_eq!(matched.kind, TransformationKind::City);
    }

    #[test]
    fn test_malformed_pattern_never_matches() {
        let rules = RuleSet::new(vec![rule("30.x-30.010", TransformationKind::City)]);
        assert!(rules.match_field("S21.G00.30.005").is_none());
    }

    #[test]
    fn test_prefix_segments_ignored() {
        let rules = RuleSet::new(vec![rule("30.001", TransformationKind::PersonName)]);
        assert!(rules.match_field("S10.G00.30.001").is_some());
        assert!(rules.match_field("X99.Z11.30.001").is_some());
    }
}
