//! Fallback digit-substitution cipher
//!
//! Digit runs outside the FF3 domain (shorter than six digits in practice)
//! are transformed with a password-keyed permutation of the ten decimal
//! digits, applied positionally. This is NOT a strong format-preserving
//! cipher: there is no per-position diffusion, a given digit always maps to
//! the same digit. It exists so that short fields still round-trip exactly
//! under the same key.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Key-seeded permutation over the decimal digits
pub struct DigitSubstitution {
    forward: [u8; 10],
    backward: [u8; 10],
}

impl DigitSubstitution {
    /// Build the permutation for a key.
    ///
    /// Seeded from the hash of the hex encoding of the key, so the alphabet
    /// is stable for a given password across runs.
    pub fn new(key: &[u8; 32]) -> Self {
        let digest = Sha256::digest(hex::encode(key).as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest[..8]);
        let mut rng = StdRng::seed_from_u64(u64::from_be_bytes(seed));

        let mut forward: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        forward.shuffle(&mut rng);

        let mut backward = [0u8; 10];
        for (plain, &substituted) in forward.iter().enumerate() {
            backward[substituted as usize] = plain as u8;
        }

        Self { forward, backward }
    }

    /// Substitute every digit in place; non-digits pass through untouched.
    pub fn encrypt(&self, input: &str) -> String {
        map_digits(input, &self.forward)
    }

    /// Invert [`encrypt`](Self::encrypt).
    pub fn decrypt(&self, input: &str) -> String {
        map_digits(input, &self.backward)
    }
}

fn map_digits(input: &str, table: &[u8; 10]) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                char::from(b'0' + table[(c as u8 - b'0') as usize])
            } else {
                c
            }
        })
        .collect()
}
