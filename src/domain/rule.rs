//! Field rules, transformation kinds and related value types
//!
//! A [`FieldRule`] binds a field-code pattern to a [`TransformationKind`].
//! Patterns are either an exact two-segment code (`"30.001"`) or an inclusive
//! range sharing a common first segment (`"30.001-30.010"`). Rules are
//! evaluated in declaration order and the first match wins; a malformed
//! pattern is a configuration hazard that silently never matches, never a
//! runtime error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of transformations the engine can apply to a field.
///
/// Adding a kind here forces every dispatch site to handle it: the engine,
/// the generator and the statistics all match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationKind {
    /// Reversible, length- and alphabet-preserving numeric cipher
    FormatPreservingNumeric,
    /// Realistic replacement person name
    PersonName,
    /// Realistic replacement street address
    Street,
    /// Realistic replacement city name
    City,
    /// Realistic replacement postal code
    PostalCode,
    /// Realistic replacement phone number
    Phone,
    /// Realistic replacement email address
    Email,
    /// Realistic replacement company name
    Company,
    /// Date jittered within a configured variance, format preserved
    DateWithVariance,
}

impl TransformationKind {
    /// Stable snake_case label, used in mapping-store category keys.
    pub fn label(&self) -> &'static str {
        match self {
            TransformationKind::FormatPreservingNumeric => "format_preserving_numeric",
            TransformationKind::PersonName => "person_name",
            TransformationKind::Street => "street",
            TransformationKind::City => "city",
            TransformationKind::PostalCode => "postal_code",
            TransformationKind::Phone => "phone",
            TransformationKind::Email => "email",
            TransformationKind::Company => "company",
            TransformationKind::DateWithVariance => "date_with_variance",
        }
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Locale for generated replacement values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    /// French (default; the source documents are French declarations)
    #[default]
    #[serde(rename = "fr_FR")]
    FrFr,
    /// English
    #[serde(rename = "en")]
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::FrFr => f.write_str("fr_FR"),
            Locale::En => f.write_str("en"),
        }
    }
}

/// Direction of a transform request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Replace the original value with a pseudonym
    Encrypt,
    /// Recover the original value
    Decrypt,
}

/// A single pseudonymization rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRule {
    /// Exact code (`"30.001"`) or inclusive range (`"30.001-30.010"`)
    pub pattern: String,

    /// Transformation to apply when the pattern matches
    pub kind: TransformationKind,

    /// Per-rule locale override for generated values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Jitter window for `date_with_variance`, in days either side; falls
    /// back to `pseudonym.date_variance_days` when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_variance_days: Option<u32>,
}

impl FieldRule {
    /// Check whether a trailing field code (`"30.005"`) matches this rule.
    ///
    /// Range semantics: the candidate and both bounds must share their first
    /// numeric segment; the second segment is compared numerically and the
    /// range is inclusive. Any malformed pattern simply never matches.
    pub fn matches_code(&self, code: &str) -> bool {
        match self.pattern.split_once('-') {
            Some((start, end)) => {
                let start_parts: Vec<&str> = start.split('.').collect();
                let end_parts: Vec<&str> = end.split('.').collect();
                let code_parts: Vec<&str> = code.split('.').collect();

                if start_parts.len() != 2 || end_parts.len() != 2 || code_parts.len() != 2 {
                    return false;
                }

                // A valid range shares its first segment on both bounds.
                if start_parts[0] != end_parts[0] || code_parts[0] != start_parts[0] {
                    return false;
                }

                match (
                    code_parts[1].parse::<u32>(),
                    start_parts[1].parse::<u32>(),
                    end_parts[1].parse::<u32>(),
                ) {
                    (Ok(n), Ok(start), Ok(end)) => start <= n && n <= end,
                    _ => false,
                }
            }
            None => code == self.pattern,
        }
    }

    /// Whether the pattern parses as an exact code or a well-formed range.
    ///
    /// Used by the configuration loader to warn about rules that can never
    /// match; the engine itself stays silent about them.
    pub fn pattern_is_well_formed(&self) -> bool {
        let is_code = |s: &str| {
            let parts: Vec<&str> = s.split('.').collect();
            parts.len() == 2 && parts.iter().all(|p| !p.is_empty() && p.parse::<u32>().is_ok())
        };
        match self.pattern.split_once('-') {
            Some((start, end)) => {
                is_code(start)
                    && is_code(end)
                    && start.split('.').next() == end.split('.').next()
            }
            None => is_code(&self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn rule(pattern: &str) -> FieldRule {
        FieldRule {
            pattern: pattern.to_string(),
            kind: TransformationKind::FormatPreservingNumeric,
            locale: None,
            date_variance_days: None,
        }
    }

    #[test_case("30.001", "30.001", true; "exact match")]
    #[test_case("30.001", "30.002", false; "exact mismatch")]
    #[test_case("30.001-30.010", "30.005", true; "inside range")]
    #[test_case("30.001-30.010", "30.001", true; "range start inclusive")]
    #[test_case("30.001-30.010", "30.010", true; "range end inclusive")]
    #[test_case("30.001-30.010", "30.011", false; "past range end")]
    #[test_case("30.001-30.010", "40.005", false; "different first segment")]
    #[test_case("30.001-40.010", "30.005", false; "range bounds disagree on first segment")]
    #[test_case("30.abc-30.010", "30.005", false; "non-numeric range bound")]
    #[test_case("30-31", "30.005", false; "wrong segment count")]
    fn test_matches_code(pattern: &str, code: &str, expected: bool) {
        assert_eq!(rule(pattern).matches_code(code), expected);
    }

    #[test]
    fn test_pattern_well_formed() {
        assert!(rule("30.001").pattern_is_well_formed());
        assert!(rule("30.001-30.010").pattern_is_well_formed());
        assert!(!rule("30.001-40.010").pattern_is_well_formed());
        assert!(!rule("30.abc").pattern_is_well_formed());
        assert!(!rule("30").pattern_is_well_formed());
        assert!(!rule("").pattern_is_well_formed());
    }

    #[test]
    fn test_kind_labels_match_serde_names() {
        let kind = TransformationKind::DateWithVariance;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.label()));
    }

    #[test]
    fn test_locale_serde_names() {
        let locale: Locale = serde_json::from_str("\"fr_FR\"").unwrap();
        assert_eq!(locale, Locale::FrFr);
        assert_eq!(locale.to_string(), "fr_FR");
    }

    #[test]
    fn test_rule_deserializes_with_defaults() {
        let rule: FieldRule =
            toml::from_str("pattern = \"11.001\"\nkind = \"date_with_variance\"").unwrap();
        assert_eq!(rule.kind, TransformationKind::DateWithVariance);
        assert!(rule.date_variance_days.is_none());
        assert!(rule.locale.is_none());
    }
}
