//! Format-preserving encryption for numeric identifiers
//!
//! National identifiers are numeric but may carry non-digit characters (the
//! NIR of people born in Corsica contains a letter, formatted values carry
//! spaces or dashes). The cipher therefore extracts the decimal digits,
//! encrypts that run with FF3, and splices the result back into the original
//! character positions, leaving everything else untouched. Downstream
//! checksum and length validators keep accepting the output.
//!
//! Runs outside the FF3 domain fall back to a keyed digit substitution, which
//! round-trips exactly but is cryptographically weak (see
//! [`substitution`] for the caveat).

mod ff3;
mod substitution;

pub use ff3::{Ff3Cipher, MAX_DIGITS, MIN_DIGITS};
pub use substitution::DigitSubstitution;

use sha2::{Digest, Sha256};

/// Reversible, length- and alphabet-preserving cipher over arbitrary strings
///
/// `encrypt` and `decrypt` are total: every input produces an output of the
/// same length with non-digit characters preserved positionally, and
/// `decrypt(encrypt(x)) == x` always holds.
pub struct FormatPreservingCipher {
    ff3: Ff3Cipher,
    fallback: DigitSubstitution,
}

impl FormatPreservingCipher {
    /// Build from the password-derived FPE key and a tweak label.
    ///
    /// The 64-bit FF3 tweak is the first 8 bytes of SHA-256 of the label, so
    /// deployments with different labels produce unrelated ciphertexts under
    /// the same password.
    pub fn new(key: &[u8; 32], tweak_label: &str) -> Self {
        let digest = Sha256::digest(tweak_label.as_bytes());
        let mut tweak = [0u8; 8];
        tweak.copy_from_slice(&digest[..8]);
        Self {
            ff3: Ff3Cipher::new(key, tweak),
            fallback: DigitSubstitution::new(key),
        }
    }

    /// Encrypt the digits of `plaintext` in place.
    pub fn encrypt(&self, plaintext: &str) -> String {
        self.apply(plaintext, true)
    }

    /// Invert [`encrypt`](Self::encrypt).
    ///
    /// The digit count decides the FF3-or-fallback path on both sides, and
    /// both paths preserve digit count, so decryption always selects the
    /// path encryption took.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        self.apply(ciphertext, false)
    }

    fn apply(&self, input: &str, encrypting: bool) -> String {
        if input.is_empty() {
            return String::new();
        }

        let digits: Vec<u8> = input
            .bytes()
            .filter(|b| b.is_ascii_digit())
            .map(|b| b - b'0')
            .collect();

        let run = if encrypting {
            self.ff3.encrypt_digits(&digits)
        } else {
            self.ff3.decrypt_digits(&digits)
        };

        match run {
            Ok(out) => splice_digits(input, &out),
            // Run outside the FF3 domain: positional substitution.
            Err(_) => {
                if encrypting {
                    self.fallback.encrypt(input)
                } else {
                    self.fallback.decrypt(input)
                }
            }
        }
    }
}

/// Write the transformed digit run back into the digit positions of `input`.
fn splice_digits(input: &str, digits: &[u8]) -> String {
    let mut run = digits.iter();
    input
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                // The run was built from exactly these positions.
                run.next().map(|&d| char::from(b'0' + d)).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
