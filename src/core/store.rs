//! Encrypted bidirectional mapping store
//!
//! The store associates `(category, original)` with `(category, transformed)`
//! in both directions. It guarantees determinism across runs for every
//! transformation kind and enables reversal for the generator-backed kinds,
//! which are not algebraically invertible.
//!
//! At rest the forward map is serialized as canonical JSON (sorted two-level
//! map), PKCS7-padded and encrypted with AES-256-CBC under the
//! password-derived store key. The on-disk blob is `IV(16) || ciphertext`
//! with a fresh random IV for every save. Writes replace the whole file, so
//! a crash mid-run only loses mappings created during that run.
//!
//! The store performs no locking; concurrent writers to the same path must
//! be serialized by the caller.

use crate::domain::{Result, StoreError};
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const IV_LEN: usize = 16;

type CategoryMap = BTreeMap<String, BTreeMap<String, String>>;

/// Outcome of loading the on-disk store
///
/// A wrong password and a corrupted file are indistinguishable at this
/// layer (CBC without authentication), but both are distinguishable from
/// "no file yet". The store always recovers to a usable empty state;
/// callers decide how loudly to surface an integrity failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No store file on disk; an empty store is the expected first-run state
    Fresh,
    /// Store decrypted and parsed; carries the number of entries restored
    Loaded(usize),
    /// A file was present but could not be decrypted or parsed
    IntegrityFailure,
}

/// Encrypted, persistent, bidirectional mapping of original to transformed
/// values, scoped by category
pub struct MappingStore {
    path: PathBuf,
    key: Zeroizing<[u8; 32]>,
    forward: CategoryMap,
    reverse: CategoryMap,
}

impl MappingStore {
    /// Create an empty store bound to a path and key. Call
    /// [`load`](Self::load) to pull in previously persisted mappings.
    pub fn new(path: impl Into<PathBuf>, key: &[u8; 32]) -> Self {
        Self {
            path: path.into(),
            key: Zeroizing::new(*key),
            forward: CategoryMap::new(),
            reverse: CategoryMap::new(),
        }
    }

    /// Record a mapping. Forward and reverse indexes are updated together.
    pub fn put(&mut self, category: &str, original: &str, transformed: &str) {
        self.forward
            .entry(category.to_string())
            .or_default()
            .insert(original.to_string(), transformed.to_string());
        self.reverse
            .entry(category.to_string())
            .or_default()
            .insert(transformed.to_string(), original.to_string());
    }

    /// Transformed value previously recorded for `(category, original)`.
    pub fn get(&self, category: &str, original: &str) -> Option<&str> {
        self.forward
            .get(category)
            .and_then(|entries| entries.get(original))
            .map(String::as_str)
    }

    /// Original value previously recorded for `(category, transformed)`.
    pub fn reverse(&self, category: &str, transformed: &str) -> Option<&str> {
        self.reverse
            .get(category)
            .and_then(|entries| entries.get(transformed))
            .map(String::as_str)
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.forward.values().map(BTreeMap::len).sum()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Entry count per category
    pub fn get_statistics(&self) -> BTreeMap<String, usize> {
        self.forward
            .iter()
            .map(|(category, entries)| (category.clone(), entries.len()))
            .collect()
    }

    /// Load persisted mappings, replacing the in-memory state.
    ///
    /// Never fails: a missing file starts empty ([`LoadOutcome::Fresh`]), and
    /// a file that cannot be decrypted or parsed resets to empty with
    /// [`LoadOutcome::IntegrityFailure`] so the caller can warn the operator
    /// instead of silently treating a wrong password as a first run.
    pub fn load(&mut self) -> LoadOutcome {
        if !self.path.exists() {
            return LoadOutcome::Fresh;
        }

        match self.try_load() {
            Ok(entries) => LoadOutcome::Loaded(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not load mapping store; continuing with an empty store"
                );
                self.forward.clear();
                self.reverse.clear();
                LoadOutcome::IntegrityFailure
            }
        }
    }

    fn try_load(&mut self) -> Result<usize> {
        let blob =
            fs::read(&self.path).map_err(|e| StoreError::Read(e.to_string()))?;
        if blob.len() < IV_LEN {
            return Err(StoreError::Integrity("file shorter than the IV".to_string()).into());
        }

        let (iv, ciphertext) = blob.split_at(IV_LEN);
        let decryptor = Aes256CbcDec::new_from_slices(self.key.as_slice(), iv)
            .map_err(|e| StoreError::Integrity(e.to_string()))?;
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                StoreError::Integrity(
                    "decryption failed (wrong password or corrupted file)".to_string(),
                )
            })?;

        let forward: CategoryMap = serde_json::from_slice(&plaintext)
            .map_err(|e| StoreError::Integrity(format!("deserialization failed: {e}")))?;

        self.reverse = rebuild_reverse(&forward);
        self.forward = forward;
        Ok(self.len())
    }

    /// Persist the forward map, replacing the on-disk blob atomically from
    /// the reader's point of view (single whole-file write).
    pub fn save(&self) -> Result<()> {
        let plaintext = serde_json::to_vec(&self.forward)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let encryptor = Aes256CbcEnc::new_from_slices(self.key.as_slice(), &iv)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(&plaintext);

        let mut blob = Vec::with_capacity(IV_LEN + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);

        fs::write(&self.path, blob).map_err(|e| StoreError::Write(e.to_string()))?;
        tracing::debug!(
            path = %self.path.display(),
            entries = self.len(),
            "Mapping store saved"
        );
        Ok(())
    }

    /// Export the forward map as indented plaintext JSON for authorized
    /// verification. The output contains original sensitive values; callers
    /// own the handling of that file.
    pub fn export_plaintext(&self, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.forward)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(output_path, json).map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

fn rebuild_reverse(forward: &CategoryMap) -> CategoryMap {
    forward
        .iter()
        .map(|(category, entries)| {
            let reversed = entries
                .iter()
                .map(|(original, transformed)| (transformed.clone(), original.clone()))
                .collect();
            (category.clone(), reversed)
        })
        .collect()
}
