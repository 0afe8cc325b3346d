//! AES-256-GCM encrypt/decrypt of short text values.
//!
//! Wire form: `version byte || 12-byte nonce || ciphertext+tag`, the whole
//! blob URL-safe base64 encoded. A fresh nonce is drawn per encryption, so
//! encrypting the same plaintext twice yields different ciphertexts.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::URL_SAFE, Engine};
use thiserror::Error;
use tracing::warn;

use super::key::EncryptionKey;
use crate::config::Config;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_LEN: usize = 12;

/// Wire format version, bumped on algorithm changes.
const VERSION: u8 = 1;

/// Secret codec errors.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Encryption failed (should not happen with a valid key)
    #[error("Encryption failed: {0}")]
    Encrypt(String),

    /// Ciphertext is malformed, tampered with, or sealed under another key
    #[error("Decryption failed: {0}")]
    Decrypt(String),
}

/// Encrypts and decrypts sensitive text values under an immutable key.
///
/// Thread-safe: the key is fixed at construction and no call mutates state.
#[derive(Clone)]
pub struct SecretCodec {
    key: EncryptionKey,
}

impl SecretCodec {
    pub fn new(key: EncryptionKey) -> Self {
        Self { key }
    }

    /// Build a codec from application config. Missing key material means an
    /// ephemeral per-process key.
    pub fn from_config(config: &Config) -> Self {
        Self::new(EncryptionKey::from_optional_material(
            config.encryption_key.as_deref(),
            None,
        ))
    }

    /// Encrypt a text value.
    ///
    /// Empty input is not encrypted: `Ok(None)` signals "nothing to store",
    /// distinct from an encryption failure.
    pub fn encrypt(&self, plaintext: &str) -> Result<Option<String>, SecretError> {
        if plaintext.is_empty() {
            return Ok(None);
        }

        let cipher = Aes256Gcm::new_from_slice(self.key.as_bytes())
            .map_err(|e| SecretError::Encrypt(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| SecretError::Encrypt(e.to_string()))?;

        let mut blob = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        blob.push(VERSION);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);

        Ok(Some(URL_SAFE.encode(blob)))
    }

    /// Decrypt a value produced by [`encrypt`](SecretCodec::encrypt).
    ///
    /// Empty input returns `Ok(None)`. Malformed, tampered, or wrong-key
    /// ciphertext returns [`SecretError::Decrypt`] — GCM authentication
    /// guarantees a bit-flip fails outright rather than yielding garbage.
    pub fn decrypt(&self, ciphertext: &str) -> Result<Option<String>, SecretError> {
        if ciphertext.is_empty() {
            return Ok(None);
        }

        let blob = URL_SAFE
            .decode(ciphertext)
            .map_err(|e| SecretError::Decrypt(format!("invalid encoding: {}", e)))?;

        if blob.len() < 1 + NONCE_LEN {
            return Err(SecretError::Decrypt("ciphertext too short".into()));
        }
        if blob[0] != VERSION {
            return Err(SecretError::Decrypt(format!(
                "unsupported version: {}",
                blob[0]
            )));
        }

        let (nonce_bytes, sealed) = blob[1..].split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(self.key.as_bytes())
            .map_err(|e| SecretError::Decrypt(e.to_string()))?;

        let plaintext = cipher
            .decrypt(nonce, sealed)
            .map_err(|_| SecretError::Decrypt("invalid key or corrupted data".into()))?;

        let text = String::from_utf8(plaintext)
            .map_err(|e| SecretError::Decrypt(format!("invalid UTF-8 in plaintext: {}", e)))?;

        Ok(Some(text))
    }

    /// Fail-soft decrypt for request handling: failures are logged and
    /// collapse to `None` so a bad stored value never turns into a 500.
    pub fn decrypt_or_none(&self, ciphertext: &str) -> Option<String> {
        match self.decrypt(ciphertext) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to decrypt stored value");
                None
            }
        }
    }
}
