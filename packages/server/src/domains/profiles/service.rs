//! Profile and expense persistence.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::models::{Expense, NewProfile};
use super::validate::{validate_expense, validate_profile, ValidationErrors};
use crate::common::secrets::{SecretCodec, SecretError};
use crate::kernel::{Direction, Document, DocumentStore, Filter, StoreError};

const USERS_COLLECTION: &str = "users";
const EXPENSES_SUBCOLLECTION: &str = "expenses";

/// Profile service errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Secret(#[from] SecretError),
}

/// Stores user profiles and expenses, encrypting sensitive fields at rest.
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    codec: SecretCodec,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>, codec: SecretCodec) -> Self {
        Self { store, codec }
    }

    /// Validate and persist a new profile.
    ///
    /// The SSN is encrypted before it is written; the password never reaches
    /// the store (credential handling belongs to the auth layer).
    pub async fn create_profile(
        &self,
        user_id: &str,
        profile: &NewProfile,
    ) -> Result<(), ProfileError> {
        validate_profile(profile)?;

        let encrypted_ssn = match profile.ssn.as_deref() {
            Some(ssn) => self.codec.encrypt(ssn)?,
            None => None,
        };

        let data = json!({
            "first_name": profile.first_name,
            "last_name": profile.last_name,
            "email": profile.email,
            "phone": profile.phone,
            "ssn": encrypted_ssn,
            "budget": profile.budget,
            "savings_goal": profile.savings_goal,
            "created_at": Utc::now().to_rfc3339(),
        });

        self.store
            .put_document(USERS_COLLECTION, user_id, data)
            .await?;
        debug!(user_id, "profile created");
        Ok(())
    }

    /// Fetch a profile with the SSN decrypted fail-soft: an undecryptable
    /// stored value comes back as null, not as an error.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, ProfileError> {
        let mut doc = match self.store.get_document(USERS_COLLECTION, user_id).await? {
            Some(doc) => doc,
            None => return Ok(None),
        };

        if let Some(ciphertext) = doc.get("ssn").and_then(Value::as_str) {
            let plaintext = self.codec.decrypt_or_none(ciphertext);
            doc["ssn"] = plaintext.map(Value::String).unwrap_or(Value::Null);
        }

        Ok(Some(doc))
    }

    /// Merge fields into an existing profile. A plaintext `ssn` in the patch
    /// is encrypted before it is written.
    pub async fn update_profile(&self, user_id: &str, mut patch: Value) -> Result<(), ProfileError> {
        if let Some(ssn) = patch.get("ssn").and_then(Value::as_str) {
            let encrypted = self.codec.encrypt(ssn)?;
            patch["ssn"] = encrypted.map(Value::String).unwrap_or(Value::Null);
        }

        self.store
            .update_document(USERS_COLLECTION, user_id, patch)
            .await?;
        Ok(())
    }

    /// Validate and record an expense, returning its generated id.
    pub async fn add_expense(&self, user_id: &str, expense: &Expense) -> Result<String, ProfileError> {
        validate_expense(expense)?;

        let data = json!({
            "amount": expense.amount,
            "category": expense.category,
            "description": expense.description,
            "created_at": Utc::now().to_rfc3339(),
        });

        let id = self
            .store
            .append_to_subcollection(
                &format!("{}/{}", USERS_COLLECTION, user_id),
                EXPENSES_SUBCOLLECTION,
                data,
            )
            .await?;
        Ok(id)
    }

    /// Recent expenses, newest first, optionally restricted to a category
    /// and/or a `created_at` date range.
    pub async fn expenses(
        &self,
        user_id: &str,
        limit: usize,
        category: Option<&str>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Document>, ProfileError> {
        let mut filters: Vec<Filter> = Vec::new();
        if let Some(category) = category {
            filters.push(Filter::eq("category", category));
        }
        if let Some(start) = start_date {
            filters.push(Filter::gte("created_at", start.to_rfc3339()));
        }
        if let Some(end) = end_date {
            filters.push(Filter::lte("created_at", end.to_rfc3339()));
        }

        let docs = self
            .store
            .query_ordered(
                &format!("{}/{}/{}", USERS_COLLECTION, user_id, EXPENSES_SUBCOLLECTION),
                &filters,
                "created_at",
                Direction::Descending,
                limit,
            )
            .await?;
        Ok(docs)
    }

    /// Total spend per category since the given cut-off.
    pub async fn expense_summary(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<HashMap<String, f64>, ProfileError> {
        let docs = self
            .store
            .query_ordered(
                &format!("{}/{}/{}", USERS_COLLECTION, user_id, EXPENSES_SUBCOLLECTION),
                &[Filter::gte("created_at", since.to_rfc3339())],
                "created_at",
                Direction::Ascending,
                usize::MAX,
            )
            .await?;

        let mut summary: HashMap<String, f64> = HashMap::new();
        for doc in docs {
            let category = doc
                .data
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or("Other")
                .to_string();
            let amount = doc.data.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
            *summary.entry(category).or_insert(0.0) += amount;
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::secrets::EncryptionKey;
    use crate::kernel::MemoryStore;
    use chrono::Duration;

    fn service() -> ProfileService {
        let codec = SecretCodec::new(EncryptionKey::derive_from_passphrase(
            "test-passphrase",
            b"test-salt",
        ));
        ProfileService::new(Arc::new(MemoryStore::new()), codec)
    }

    fn new_profile() -> NewProfile {
        NewProfile {
            first_name: "Dana".to_string(),
            last_name: "Lee".to_string(),
            email: "dana@university.edu".to_string(),
            password: "longenough".to_string(),
            phone: Some("5551234567".to_string()),
            ssn: Some("123-45-6789".to_string()),
            budget: Some(800.0),
            savings_goal: Some(150.0),
        }
    }

    #[tokio::test]
    async fn ssn_is_encrypted_at_rest_and_decrypted_on_read() {
        let service = service();
        service.create_profile("u1", &new_profile()).await.unwrap();

        // Raw stored document must not contain the plaintext SSN.
        let raw = service
            .store
            .get_document("users", "u1")
            .await
            .unwrap()
            .unwrap();
        let stored_ssn = raw["ssn"].as_str().unwrap();
        assert_ne!(stored_ssn, "123-45-6789");

        let profile = service.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile["ssn"], "123-45-6789");
    }

    #[tokio::test]
    async fn password_is_never_persisted() {
        let service = service();
        service.create_profile("u1", &new_profile()).await.unwrap();

        let raw = service
            .store
            .get_document("users", "u1")
            .await
            .unwrap()
            .unwrap();
        assert!(raw.get("password").is_none());
    }

    #[tokio::test]
    async fn invalid_profile_is_rejected_before_store() {
        let service = service();
        let mut profile = new_profile();
        profile.email = "nope".to_string();

        let err = service.create_profile("u1", &profile).await.unwrap_err();
        assert!(matches!(err, ProfileError::Validation(_)));
        assert!(service.get_profile("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn undecryptable_ssn_reads_as_null() {
        let service = service();
        service.create_profile("u1", &new_profile()).await.unwrap();

        // Overwrite the stored ciphertext with junk; reads must degrade, not fail.
        service
            .store
            .update_document("users", "u1", json!({"ssn": "corrupted-blob"}))
            .await
            .unwrap();

        let profile = service.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile["ssn"], Value::Null);
    }

    #[tokio::test]
    async fn update_re_encrypts_ssn() {
        let service = service();
        service.create_profile("u1", &new_profile()).await.unwrap();

        service
            .update_profile("u1", json!({"ssn": "987-65-4321", "budget": 900.0}))
            .await
            .unwrap();

        let raw = service
            .store
            .get_document("users", "u1")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(raw["ssn"], "987-65-4321");

        let profile = service.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile["ssn"], "987-65-4321");
        assert_eq!(profile["budget"], 900.0);
    }

    #[tokio::test]
    async fn expenses_filter_and_order() {
        let service = service();
        for (amount, category) in [(12.0, "food"), (30.0, "books"), (8.0, "food")] {
            service
                .add_expense(
                    "u1",
                    &Expense {
                        amount,
                        category: category.to_string(),
                        description: None,
                    },
                )
                .await
                .unwrap();
        }

        let all = service.expenses("u1", 10, None, None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let food = service
            .expenses("u1", 10, Some("food"), None, None)
            .await
            .unwrap();
        assert_eq!(food.len(), 2);
    }

    #[tokio::test]
    async fn invalid_expense_is_rejected_before_store() {
        let service = service();
        let expense = Expense {
            amount: -50.0,
            category: String::new(),
            description: None,
        };

        let err = service.add_expense("u1", &expense).await.unwrap_err();
        match err {
            ProfileError::Validation(errors) => {
                assert!(errors.fields.contains_key("amount"));
                assert!(errors.fields.contains_key("category"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let all = service.expenses("u1", 10, None, None, None).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn expenses_filter_by_date_range() {
        let service = service();

        // Write entries with controlled timestamps, bypassing add_expense's
        // now() stamping.
        for (ts, amount) in [
            ("2026-01-01T00:00:00+00:00", 10.0),
            ("2026-01-05T00:00:00+00:00", 20.0),
            ("2026-01-09T00:00:00+00:00", 30.0),
        ] {
            service
                .store
                .append_to_subcollection(
                    "users/u1",
                    "expenses",
                    json!({"created_at": ts, "amount": amount, "category": "food"}),
                )
                .await
                .unwrap();
        }

        let start = "2026-01-03T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2026-01-07T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let middle = service
            .expenses("u1", 10, None, Some(start), Some(end))
            .await
            .unwrap();
        assert_eq!(middle.len(), 1);
        assert_eq!(middle[0].data["amount"], 20.0);

        let from_start = service
            .expenses("u1", 10, None, Some(start), None)
            .await
            .unwrap();
        assert_eq!(from_start.len(), 2);

        let until_end = service
            .expenses("u1", 10, None, None, Some(end))
            .await
            .unwrap();
        assert_eq!(until_end.len(), 2);
    }

    #[tokio::test]
    async fn summary_totals_by_category() {
        let service = service();
        for (amount, category) in [(12.0, "food"), (30.0, "books"), (8.0, "food")] {
            service
                .add_expense(
                    "u1",
                    &Expense {
                        amount,
                        category: category.to_string(),
                        description: None,
                    },
                )
                .await
                .unwrap();
        }

        let since = Utc::now() - Duration::hours(1);
        let summary = service.expense_summary("u1", since).await.unwrap();

        assert_eq!(summary["food"], 20.0);
        assert_eq!(summary["books"], 30.0);
        assert_eq!(summary.len(), 2);
    }
}
