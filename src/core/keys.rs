//! Password-derived key material
//!
//! One password keys two independent subsystems: the format-preserving cipher
//! and the encrypted mapping store. Each gets its own 32-byte key derived
//! under a distinct fixed salt, so recovering one key tells an attacker
//! nothing about the other. Derivation happens once, at engine construction;
//! the material is passed by reference into each component and zeroized on
//! drop.

use crate::config::SecretString;
use pbkdf2::pbkdf2_hmac;
use secrecy::ExposeSecret;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// PBKDF2-HMAC-SHA256 iteration count for both derivations
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt for the format-preserving cipher key
const FPE_KEY_SALT: &[u8] = b"veil_fpe_salt";

/// Salt for the mapping store key
const STORE_KEY_SALT: &[u8] = b"veil_mapping_salt";

/// The two symmetric keys derived from the user password
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    fpe_key: [u8; 32],
    store_key: [u8; 32],
}

impl KeyMaterial {
    /// Derive both keys from the password. Deliberately slow.
    pub fn derive(password: &SecretString) -> Self {
        Self {
            fpe_key: derive_key(password, FPE_KEY_SALT),
            store_key: derive_key(password, STORE_KEY_SALT),
        }
    }

    /// Key for the format-preserving cipher
    pub fn fpe_key(&self) -> &[u8; 32] {
        &self.fpe_key
    }

    /// Key for the encrypted mapping store
    pub fn store_key(&self) -> &[u8; 32] {
        &self.store_key
    }
}

fn derive_key(password: &SecretString, salt: &[u8]) -> [u8; 32] {
    let password_str: &str = password.expose_secret().as_ref();
    let mut out = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password_str.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    out
}
