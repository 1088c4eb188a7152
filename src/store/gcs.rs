//! Google Cloud Storage collaborator, backed by the `object_store` crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::{Attribute, GetOptions, ObjectStore};
use tracing::debug;

use super::{ObjectMetadata, ObjectStoreClient};
use crate::errors::{Error, Result};

/// Google Cloud Storage configuration.
#[derive(Debug, Clone, Default)]
pub struct GcsConfig {
    /// Path to a service account JSON key file. When absent the SDK falls
    /// back to Application Default Credentials.
    pub service_account_path: Option<String>,
}

impl GcsConfig {
    /// Read configuration from the environment
    /// (`GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn from_env() -> Self {
        Self {
            service_account_path: std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
        }
    }
}

/// Metadata client for Google Cloud Storage.
///
/// `object_store` clients are bound to a single bucket, so one is built per
/// bucket on first use and kept for the lifetime of the store. Building a
/// client performs no network I/O.
pub struct GcsStore {
    config: GcsConfig,
    clients: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl GcsStore {
    pub fn new(config: GcsConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client_for(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| Error::Transport("gcs client registry poisoned".to_string()))?;
        if let Some(client) = clients.get(bucket) {
            return Ok(client.clone());
        }

        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(bucket);
        if let Some(path) = &self.config.service_account_path {
            builder = builder.with_service_account_path(path.as_str());
        }
        let client: Arc<dyn ObjectStore> = Arc::new(builder.build().map_err(|e| {
            Error::Transport(format!("failed to create GCS client for bucket `{bucket}`: {e}"))
        })?);
        clients.insert(bucket.to_string(), client.clone());
        Ok(client)
    }
}

#[async_trait]
impl ObjectStoreClient for GcsStore {
    async fn lookup_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        let client = self.client_for(bucket)?;
        let path = Path::from(key);
        debug!("GCS HEAD: {bucket}/{path}");

        // A headed GET rather than a plain head(): only the former carries
        // the extension attributes (cache-control and friends) back.
        let mut options = GetOptions::default();
        options.head = true;

        match client.get_opts(&path, options).await {
            Ok(result) => {
                let mut metadata = ObjectMetadata {
                    size: result.meta.size as u64,
                    updated: Some(result.meta.last_modified),
                    etag: result.meta.e_tag.clone(),
                    version_id: result.meta.version.clone(),
                    ..Default::default()
                };
                for (attribute, value) in result.attributes.iter() {
                    match attribute {
                        Attribute::CacheControl => {
                            metadata.cache_control = Some(value.to_string());
                        }
                        Attribute::ContentType => {
                            metadata.content_type = Some(value.to_string());
                        }
                        Attribute::ContentEncoding => {
                            metadata.content_encoding = Some(value.to_string());
                        }
                        Attribute::ContentDisposition => {
                            metadata.content_disposition = Some(value.to_string());
                        }
                        Attribute::ContentLanguage => {
                            metadata.content_language = Some(value.to_string());
                        }
                        Attribute::Metadata(name) => {
                            metadata
                                .user_metadata
                                .insert(name.to_string(), value.to_string());
                        }
                        _ => {}
                    }
                }
                Ok(metadata)
            }
            Err(object_store::Error::NotFound { .. }) => Err(Error::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(Error::Transport(format!("GCS HEAD failed: {e}"))),
        }
    }

    async fn prefix_exists(&self, bucket: &str, prefix: &str) -> Result<bool> {
        let client = self.client_for(bucket)?;
        debug!("GCS LIST: {bucket}/{prefix} (limit 1)");

        let prefix_path = if prefix.is_empty() {
            None
        } else {
            Some(Path::from(prefix))
        };
        let mut stream = client.list(prefix_path.as_ref());
        match stream.next().await {
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(Error::Transport(format!("GCS LIST failed: {e}"))),
            None => Ok(false),
        }
    }
}
