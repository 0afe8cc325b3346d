//! At-rest encryption of sensitive profile fields (SSNs and the like).
//!
//! Values are encrypted with AES-256-GCM under a process-lifetime key and
//! stored as opaque URL-safe base64 strings. The key is either supplied
//! directly (URL-safe base64, 32 bytes) or derived from a passphrase with
//! PBKDF2-HMAC-SHA256.
//!
//! Decryption of tampered or foreign ciphertext is a recoverable condition:
//! route-layer code uses [`SecretCodec::decrypt_or_none`] and treats a missing
//! value as "unavailable", never as a server error.

pub mod codec;
pub mod key;

pub use codec::{SecretCodec, SecretError};
pub use key::EncryptionKey;
