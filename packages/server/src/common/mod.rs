//! Shared infrastructure used across domains.

pub mod secrets;
pub mod validate;

pub use secrets::{EncryptionKey, SecretCodec, SecretError};
pub use validate::ValidationErrors;
