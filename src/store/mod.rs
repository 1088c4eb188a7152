//! Remote object-store collaborators.
//!
//! The attribute view reads through the [`ObjectStoreClient`] trait; this
//! module provides the two implementations:
//!
//! - **Gcs**: Google Cloud Storage, via the `object_store` crate
//! - **Memory**: an in-process store for tests and local runs

mod gcs;
mod memory;

pub use gcs::{GcsConfig, GcsStore};
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Metadata record for one stored object, as reported by the remote store.
///
/// Extension fields (cache-control and similar) are optional and absent by
/// default; `size` is always present on a concrete object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Size in bytes.
    pub size: u64,

    /// When the object was first created, if the store reports it.
    pub created: Option<DateTime<Utc>>,

    /// When the object was last written, if the store reports it.
    pub updated: Option<DateTime<Utc>>,

    /// Base64-encoded MD5 of the content, if available.
    pub etag: Option<String>,

    /// Content type (MIME type).
    pub content_type: Option<String>,

    pub content_encoding: Option<String>,

    pub content_disposition: Option<String>,

    pub content_language: Option<String>,

    /// Cache-control directive attached at write time.
    pub cache_control: Option<String>,

    /// Version identifier for the current generation of the object, if the
    /// store tracks one.
    pub version_id: Option<String>,

    /// User-defined key-value metadata entries.
    pub user_metadata: BTreeMap<String, String>,
}

/// Extension metadata attached to an object at write time.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub content_disposition: Option<String>,
    pub content_language: Option<String>,
    pub cache_control: Option<String>,
    pub user_metadata: BTreeMap<String, String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    pub fn content_encoding(mut self, value: impl Into<String>) -> Self {
        self.content_encoding = Some(value.into());
        self
    }

    pub fn content_disposition(mut self, value: impl Into<String>) -> Self {
        self.content_disposition = Some(value.into());
        self
    }

    pub fn content_language(mut self, value: impl Into<String>) -> Self {
        self.content_language = Some(value.into());
        self
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn user_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.user_metadata.insert(key.into(), value.into());
        self
    }
}

/// Point-to-point metadata access against a remote object store.
///
/// Both operations are independent request/response calls with no local
/// state, so clients may be shared across tasks freely. Retries, timeouts,
/// and cancellation live below this trait.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Look up the metadata of the concrete object at `key`.
    ///
    /// Fails with [`crate::Error::NotFound`] when no object exists at the
    /// exact key, and [`crate::Error::Transport`] for anything the store
    /// itself reports.
    async fn lookup_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata>;

    /// True if at least one object exists under `prefix` (limit-1 probe).
    /// The empty prefix matches every object in the bucket.
    async fn prefix_exists(&self, bucket: &str, prefix: &str) -> Result<bool>;
}
