//! In-memory [`DocumentStore`] for tests and local development.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{Direction, Document, DocumentStore, Filter, FilterOp, StoreError};

/// HashMap-backed store keyed by collection path, then document id.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Ordering over the JSON value types our documents use for sort/filter
/// fields (numbers and strings, e.g. amounts and RFC 3339 timestamps).
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn matches(data: &Value, filter: &Filter) -> bool {
    let field = match data.get(&filter.field) {
        Some(v) => v,
        None => return false,
    };
    match filter.op {
        FilterOp::Eq => field == &filter.value,
        FilterOp::Gte => compare_values(field, &filter.value) != Ordering::Less,
        FilterOp::Lte => compare_values(field, &filter.value) != Ordering::Greater,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;

        match (doc, patch) {
            (Value::Object(existing), Value::Object(fields)) => {
                for (key, value) in fields {
                    existing.insert(key, value);
                }
                Ok(())
            }
            _ => Err(StoreError::Backend(
                "update requires object documents".into(),
            )),
        }
    }

    async fn append_to_subcollection(
        &self,
        parent: &str,
        subcollection: &str,
        data: Value,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let path = format!("{}/{}", parent, subcollection);
        self.put_document(&path, &id, data).await?;
        Ok(id)
    }

    async fn query_ordered(
        &self,
        path: &str,
        filters: &[Filter],
        order_by: &str,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let docs = match collections.get(path) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };

        let mut results: Vec<Document> = docs
            .iter()
            .filter(|(_, data)| filters.iter().all(|f| matches(data, f)))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            let av = a.data.get(order_by).unwrap_or(&Value::Null);
            let bv = b.data.get(order_by).unwrap_or(&Value::Null);
            let ord = compare_values(av, bv);
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        });
        results.truncate(limit);

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryStore::new();
        store
            .put_document("users", "u1", json!({"name": "Dana"}))
            .await
            .unwrap();

        let doc = store.get_document("users", "u1").await.unwrap();
        assert_eq!(doc, Some(json!({"name": "Dana"})));
        assert_eq!(store.get_document("users", "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        store
            .put_document("users", "u1", json!({"name": "Dana", "budget": 400}))
            .await
            .unwrap();
        store
            .update_document("users", "u1", json!({"budget": 450}))
            .await
            .unwrap();

        let doc = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc, json!({"name": "Dana", "budget": 450}));
    }

    #[tokio::test]
    async fn update_missing_document_errors() {
        let store = MemoryStore::new();
        let err = store
            .update_document("users", "ghost", json!({"budget": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn append_generates_unique_ids() {
        let store = MemoryStore::new();
        let a = store
            .append_to_subcollection("users/u1", "expenses", json!({"amount": 5}))
            .await
            .unwrap();
        let b = store
            .append_to_subcollection("users/u1", "expenses", json!({"amount": 9}))
            .await
            .unwrap();

        assert_ne!(a, b);
        let doc = store.get_document("users/u1/expenses", &a).await.unwrap();
        assert_eq!(doc, Some(json!({"amount": 5})));
    }

    #[tokio::test]
    async fn query_orders_filters_and_limits() {
        let store = MemoryStore::new();
        for (ts, amount, category) in [
            ("2026-01-01T00:00:00Z", 12.0, "food"),
            ("2026-01-03T00:00:00Z", 30.0, "books"),
            ("2026-01-02T00:00:00Z", 8.0, "food"),
        ] {
            store
                .append_to_subcollection(
                    "users/u1",
                    "expenses",
                    json!({"created_at": ts, "amount": amount, "category": category}),
                )
                .await
                .unwrap();
        }

        let newest_first = store
            .query_ordered(
                "users/u1/expenses",
                &[],
                "created_at",
                Direction::Descending,
                2,
            )
            .await
            .unwrap();
        assert_eq!(newest_first.len(), 2);
        assert_eq!(newest_first[0].data["amount"], json!(30.0));
        assert_eq!(newest_first[1].data["amount"], json!(8.0));

        let food_only = store
            .query_ordered(
                "users/u1/expenses",
                &[Filter::eq("category", "food")],
                "created_at",
                Direction::Ascending,
                10,
            )
            .await
            .unwrap();
        assert_eq!(food_only.len(), 2);
        assert_eq!(food_only[0].data["amount"], json!(12.0));

        let since = store
            .query_ordered(
                "users/u1/expenses",
                &[Filter::gte("created_at", "2026-01-02T00:00:00Z")],
                "created_at",
                Direction::Ascending,
                10,
            )
            .await
            .unwrap();
        assert_eq!(since.len(), 2);
    }

    #[tokio::test]
    async fn query_on_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let docs = store
            .query_ordered("nowhere", &[], "created_at", Direction::Descending, 5)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
