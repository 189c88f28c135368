//! Blog post persistence.
//!
//! Handlers only see `Arc<dyn PostStore>`; the backend is picked at startup from
//! `BLOG_STORE`. Each operation touches exactly one record and relies on the backend's
//! per-item atomicity. There is no optimistic-concurrency check: the last writer wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::post::{BlogPost, PostUpdate};

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoPostStore;
pub use memory::MemoryPostStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional insert found an existing record with the same slug.
    #[error("post '{0}' already exists")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Full scan, in backend order.
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError>;

    async fn get(&self, slug: &str) -> Result<Option<BlogPost>, StoreError>;

    /// Fails with `StoreError::Conflict` and leaves the stored record untouched when
    /// the slug is taken.
    async fn insert_if_absent(&self, post: &BlogPost) -> Result<(), StoreError>;

    /// Replaces every mutable field, creating the record if it does not exist.
    async fn overwrite(&self, slug: &str, update: &PostUpdate) -> Result<(), StoreError>;

    /// Idempotent.
    async fn delete(&self, slug: &str) -> Result<(), StoreError>;
}
