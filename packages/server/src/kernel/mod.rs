//! Kernel module - external collaborator contracts.

pub mod memory_store;
pub mod store;

pub use memory_store::MemoryStore;
pub use store::{Direction, Document, DocumentStore, Filter, FilterOp, StoreError};
