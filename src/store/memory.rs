//! In-process object store for tests and local runs.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ObjectMetadata, ObjectStoreClient, WriteOptions};
use crate::addr::ObjectAddress;
use crate::errors::{Error, Result};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    etag: String,
    version_id: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    options: WriteOptions,
}

/// Map-backed store with the same observable metadata behavior as the
/// remote one: verbatim keys (so zero-byte `dir/` placeholders work),
/// base64 MD5 etags, and a fresh version id per write.
///
/// Data does not persist between runs; this store is primarily useful as a
/// test double for the attribute view.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an object, overwriting any previous generation at the key.
    ///
    /// Validates the address before touching state. The creation time of an
    /// overwritten object is preserved; etag and version id are recomputed.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        options: WriteOptions,
    ) -> Result<ObjectMetadata> {
        let address = ObjectAddress::new(bucket, key)?;
        if key.is_empty() {
            return Err(Error::InvalidObjectKey {
                key: key.to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        debug!("memory PUT: {address}");

        let now = Utc::now();
        let object = StoredObject {
            etag: general_purpose::STANDARD.encode(md5::compute(&data).0),
            version_id: Uuid::new_v4().to_string(),
            data,
            created: now,
            updated: now,
            options,
        };

        let mut buckets = self.buckets.write().await;
        let objects = buckets.entry(bucket.to_string()).or_default();
        let object = match objects.get(key) {
            Some(previous) => StoredObject {
                created: previous.created,
                ..object
            },
            None => object,
        };
        let metadata = metadata_of(&object);
        objects.insert(key.to_string(), object);
        Ok(metadata)
    }

    /// Read an object's content back.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|object| object.data.clone())
            .ok_or_else(|| not_found(bucket, key))
    }

    /// Remove an object. Fails with `NotFound` if nothing is stored there.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        debug!("memory DELETE: {bucket}/{key}");
        let mut buckets = self.buckets.write().await;
        buckets
            .get_mut(bucket)
            .and_then(|objects| objects.remove(key))
            .map(|_| ())
            .ok_or_else(|| not_found(bucket, key))
    }
}

#[async_trait]
impl ObjectStoreClient for MemoryStore {
    async fn lookup_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        debug!("memory HEAD: {bucket}/{key}");
        let buckets = self.buckets.read().await;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(metadata_of)
            .ok_or_else(|| not_found(bucket, key))
    }

    async fn prefix_exists(&self, bucket: &str, prefix: &str) -> Result<bool> {
        debug!("memory LIST: {bucket}/{prefix} (limit 1)");
        let buckets = self.buckets.read().await;
        let Some(objects) = buckets.get(bucket) else {
            return Ok(false);
        };
        Ok(objects
            .range(prefix.to_string()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(prefix)))
    }
}

fn metadata_of(object: &StoredObject) -> ObjectMetadata {
    ObjectMetadata {
        size: object.data.len() as u64,
        created: Some(object.created),
        updated: Some(object.updated),
        etag: Some(object.etag.clone()),
        content_type: object.options.content_type.clone(),
        content_encoding: object.options.content_encoding.clone(),
        content_disposition: object.options.content_disposition.clone(),
        content_language: object.options.content_language.clone(),
        cache_control: object.options.cache_control.clone(),
        version_id: Some(object.version_id.clone()),
        user_metadata: object.options.user_metadata.clone(),
    }
}

fn not_found(bucket: &str, key: &str) -> Error {
    Error::NotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_lookup_surfaces_extension_fields() {
        let store = MemoryStore::new();
        store
            .put_object(
                "red",
                "water",
                Bytes::from("splash"),
                WriteOptions::new()
                    .cache_control("public, max-age=60")
                    .content_type("text/plain")
                    .user_metadata_entry("origin", "unit-test"),
            )
            .await
            .unwrap();

        let meta = store.lookup_object("red", "water").await.unwrap();
        assert_eq!(meta.size, 6);
        assert_eq!(meta.cache_control.as_deref(), Some("public, max-age=60"));
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));
        assert_eq!(meta.user_metadata.get("origin").unwrap(), "unit-test");
        assert!(meta.etag.is_some());
        assert!(meta.created.is_some());
    }

    #[tokio::test]
    async fn lookup_missing_object_is_not_found() {
        let store = MemoryStore::new();
        let err = store.lookup_object("red", "water").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn overwrite_keeps_creation_time_and_rotates_version() {
        let store = MemoryStore::new();
        let first = store
            .put_object("red", "water", Bytes::from("a"), WriteOptions::new())
            .await
            .unwrap();
        let second = store
            .put_object("red", "water", Bytes::from("bb"), WriteOptions::new())
            .await
            .unwrap();

        assert_eq!(first.created, second.created);
        assert_ne!(first.version_id, second.version_id);
        assert_ne!(first.etag, second.etag);
        assert_eq!(second.size, 2);
    }

    #[tokio::test]
    async fn prefix_probe_matches_only_real_prefixes() {
        let store = MemoryStore::new();
        store
            .put_object("red", "rum/x", Bytes::from("x"), WriteOptions::new())
            .await
            .unwrap();

        assert!(store.prefix_exists("red", "rum/").await.unwrap());
        assert!(store.prefix_exists("red", "").await.unwrap());
        assert!(!store.prefix_exists("red", "rumor/").await.unwrap());
        assert!(!store.prefix_exists("blue", "rum/").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let store = MemoryStore::new();
        store
            .put_object("red", "water", Bytes::from("x"), WriteOptions::new())
            .await
            .unwrap();
        store.delete_object("red", "water").await.unwrap();

        assert!(store.delete_object("red", "water").await.unwrap_err().is_not_found());
        assert!(store.lookup_object("red", "water").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn rejects_invalid_addresses_before_writing() {
        let store = MemoryStore::new();
        let err = store
            .put_object("red", "../escape", Bytes::from("x"), WriteOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = store
            .put_object("red", "", Bytes::from("x"), WriteOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn content_round_trips() {
        let store = MemoryStore::new();
        let data = Bytes::from("(happy face)");
        store
            .put_object("red", "water", data.clone(), WriteOptions::new())
            .await
            .unwrap();
        assert_eq!(store.get_object("red", "water").await.unwrap(), data);
    }
}
