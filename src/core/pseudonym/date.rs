//! Age-preserving date jitter
//!
//! Dates are shifted by a deterministic offset drawn from the hash of the
//! original string, within the configured variance window, and re-rendered in
//! exactly the pattern detected on input. The shifted date stays in the same
//! rough life period as the original (birth dates keep the subject's age
//! bracket) without being the exact value.

use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Accepted input patterns, tried in order. The first that parses decides
/// the output rendering.
const DATE_PATTERNS: [&str; 4] = [
    "%Y-%m-%d", // ISO
    "%d/%m/%Y", // French
    "%Y%m%d",   // compact
    "%d-%m-%Y", // alternate
];

/// Jitter a date string within `[-variance_days, +variance_days]`.
///
/// Unparseable input is returned unchanged: declarations carry stray
/// free-text in nominally-date fields, and a run must never abort on them.
/// Fail-open is deliberate here.
pub(super) fn jitter_date(original: &str, variance_days: u32) -> String {
    let trimmed = original.trim();

    let parsed = DATE_PATTERNS
        .iter()
        .find_map(|pattern| {
            NaiveDate::parse_from_str(trimmed, pattern)
                .ok()
                .map(|date| (date, *pattern))
        });

    let Some((date, pattern)) = parsed else {
        return original.to_string();
    };

    let mut rng = super::seeded_rng(original);
    let variance = i64::from(variance_days);
    let offset = rng.gen_range(-variance..=variance);

    match date.checked_add_signed(Duration::days(offset)) {
        Some(shifted) => shifted.format(pattern).to_string(),
        // Offset pushed the date outside chrono's representable range.
        None => original.to_string(),
    }
}
