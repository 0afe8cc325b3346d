use serde::{Deserialize, Serialize};

/// Signup payload for a new user profile.
///
/// Field names match the JSON the web client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Handled by the auth layer; never persisted by this crate.
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Stored encrypted, used for need-based scholarship matching.
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub savings_goal: Option<f64>,
}

/// A single expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}
