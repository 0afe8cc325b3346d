//! User profiles and expense tracking.
//!
//! Sensitive profile fields (the SSN used for scholarship matching) pass
//! through the secret codec before touching the store, and are decrypted
//! fail-soft on the way out.

pub mod models;
pub mod service;
pub mod validate;

pub use models::{Expense, NewProfile};
pub use service::{ProfileError, ProfileService};
pub use validate::{validate_expense, validate_profile, ValidationErrors};
