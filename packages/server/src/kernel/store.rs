//! Document-store contract.
//!
//! A narrow key-value-with-subcollections interface modeled on managed
//! document databases (Firestore-style paths like `users/{id}/expenses`).
//! Domain services depend on this trait; production wires in a real backend,
//! tests use [`MemoryStore`](super::MemoryStore).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found where one was required
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Backend failure (connection, permission, serialization)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Comparison operator for query filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

/// A single field comparison applied to a query.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte,
            value: value.into(),
        }
    }
}

/// A stored document with its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Narrow contract over a managed document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create or replace the document at `collection/id`.
    async fn put_document(&self, collection: &str, id: &str, data: Value)
        -> Result<(), StoreError>;

    /// Fetch a document, or `None` if absent.
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Value>, StoreError>;

    /// Merge `patch` fields into an existing document. Errors if the
    /// document does not exist.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<(), StoreError>;

    /// Append a document with a generated id to `parent/subcollection`,
    /// returning the new id.
    async fn append_to_subcollection(
        &self,
        parent: &str,
        subcollection: &str,
        data: Value,
    ) -> Result<String, StoreError>;

    /// Query a collection path with filters, ordering, and a result limit.
    async fn query_ordered(
        &self,
        path: &str,
        filters: &[Filter],
        order_by: &str,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;
}
