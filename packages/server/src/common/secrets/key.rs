//! Symmetric key material for the secret codec.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use base64::{engine::general_purpose::URL_SAFE, Engine};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use tracing::warn;

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Fixed salt for passphrase-derived keys. Keeps derivation deterministic
/// across processes so the same passphrase always opens the same data.
pub const DEFAULT_SALT: &[u8] = b"bursar-key-derivation-salt";

/// PBKDF2-HMAC-SHA256 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A 256-bit symmetric key, immutable once constructed.
#[derive(Clone)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Generate a fresh random key.
    ///
    /// The key lives only for this process: anything encrypted under it is
    /// unrecoverable after restart. Persistent deployments must supply key
    /// material via [`EncryptionKey::from_material`].
    pub fn generate() -> Self {
        warn!("no encryption key supplied, generating an ephemeral key for this process only");
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build a key from caller-supplied material.
    ///
    /// Material that decodes as URL-safe base64 to exactly 32 bytes is used
    /// as the key directly; anything else is treated as a passphrase and run
    /// through PBKDF2-HMAC-SHA256 with the given salt (or [`DEFAULT_SALT`]).
    pub fn from_material(material: &str, salt: Option<&[u8]>) -> Self {
        if let Ok(bytes) = URL_SAFE.decode(material) {
            if bytes.len() == KEY_LEN {
                let mut key = [0u8; KEY_LEN];
                key.copy_from_slice(&bytes);
                return Self(key);
            }
        }
        Self::derive_from_passphrase(material, salt.unwrap_or(DEFAULT_SALT))
    }

    /// Derive a key from a passphrase. Deterministic for a given
    /// passphrase + salt pair.
    pub fn derive_from_passphrase(passphrase: &str, salt: &[u8]) -> Self {
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
        Self(key)
    }

    /// Optional material: present -> [`from_material`], absent -> ephemeral key.
    ///
    /// [`from_material`]: EncryptionKey::from_material
    pub fn from_optional_material(material: Option<&str>, salt: Option<&[u8]>) -> Self {
        match material {
            Some(m) if !m.is_empty() => Self::from_material(m, salt),
            _ => Self::generate(),
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// URL-safe base64 encoding of the key, e.g. for writing to a secrets file.
    pub fn to_encoded(&self) -> String {
        URL_SAFE.encode(self.0)
    }
}

// Keep key bytes out of debug output and logs.
impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}
