//! Properties of the format-preserving cipher over realistic field values.

use veil::core::fpe::FormatPreservingCipher;

const KEY: [u8; 32] = [0x42; 32];

fn cipher() -> FormatPreservingCipher {
    FormatPreservingCipher::new(&KEY, "veil")
}

#[test]
fn test_round_trip_over_realistic_identifiers() {
    let cipher = cipher();
    // NIR, SIRET, bank account, phone-shaped, short code.
    for original in [
        "1234567890123",
        "73282932000074",
        "FR7630006000011234567890189",
        "+33 6 12 34 56 78",
        "1234",
    ] {
        let encrypted = cipher.encrypt(original);
        assert_eq!(cipher.decrypt(&encrypted), original, "failed for {original}");
    }
}

#[test]
fn test_length_and_digit_positions_preserved() {
    let cipher = cipher();
    let original = "1 85 05 78 006 084 36";
    let encrypted = cipher.encrypt(original);

    assert_eq!(encrypted.len(), original.len());
    for (o, e) in original.chars().zip(encrypted.chars()) {
        assert_eq!(o.is_ascii_digit(), e.is_ascii_digit());
        if !o.is_ascii_digit() {
            assert_eq!(o, e, "non-digit characters must pass through");
        }
    }
}

#[test]
fn test_deterministic_under_same_key_and_tweak() {
    let a = cipher();
    let b = cipher();
    assert_eq!(a.encrypt("1234567890123"), b.encrypt("1234567890123"));
}

#[test]
fn test_distinct_keys_give_distinct_ciphertexts() {
    let a = FormatPreservingCipher::new(&[0x01; 32], "veil");
    let b = FormatPreservingCipher::new(&[0x02; 32], "veil");
    assert_ne!(a.encrypt("1234567890123"), b.encrypt("1234567890123"));
}

#[test]
fn test_distinct_tweak_labels_give_distinct_ciphertexts() {
    let a = FormatPreservingCipher::new(&KEY, "payroll-2025");
    let b = FormatPreservingCipher::new(&KEY, "payroll-2026");
    assert_ne!(a.encrypt("1234567890123"), b.encrypt("1234567890123"));
}

#[test]
fn test_short_runs_use_the_fallback_and_still_round_trip() {
    let cipher = cipher();
    for original in ["0", "12", "12345", "A-9-B"] {
        let encrypted = cipher.encrypt(original);
        assert_eq!(encrypted.len(), original.len());
        assert_eq!(cipher.decrypt(&encrypted), original);
    }
}

#[test]
fn test_digitless_input_passes_through() {
    let cipher = cipher();
    assert_eq!(cipher.encrypt("no digits here"), "no digits here");
    assert_eq!(cipher.encrypt(""), "");
}
