//! Lazy attribute view over one addressed object in the remote store.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::addr::ObjectAddress;
use crate::attrs::{Attributes, ObjectAttributes, PseudoDirectoryAttributes};
use crate::errors::{Error, Result};
use crate::store::ObjectStoreClient;

/// Registry name under which this view implementation is routed.
pub const VIEW_NAME: &str = "gcs";

/// A handle bound to exactly one [`ObjectAddress`].
///
/// The view holds no fetched data; every [`read_attributes`] call re-fetches
/// from the store. Identity (equality and hash) is defined solely by the
/// bound address, so it is stable before any I/O occurs and regardless of
/// whether the address resolves to anything. Views own no remote resource
/// and need no explicit release.
///
/// [`read_attributes`]: ObjectAttributeView::read_attributes
#[derive(Clone)]
pub struct ObjectAttributeView {
    address: ObjectAddress,
    store: Arc<dyn ObjectStoreClient>,
}

impl ObjectAttributeView {
    pub fn new(store: Arc<dyn ObjectStoreClient>, address: ObjectAddress) -> Self {
        Self { address, store }
    }

    /// Bind a view to the address a `gs://bucket/key` URI denotes.
    pub fn for_uri(store: Arc<dyn ObjectStoreClient>, uri: &str) -> Result<Self> {
        Ok(Self::new(store, ObjectAddress::parse(uri)?))
    }

    /// The fixed name identifying this view implementation, independent of
    /// the bound address and of read state.
    pub fn name(&self) -> &'static str {
        VIEW_NAME
    }

    pub fn address(&self) -> &ObjectAddress {
        &self.address
    }

    /// Fetch the attributes of the addressed location.
    ///
    /// A concrete object at the exact key yields
    /// [`Attributes::Object`]; otherwise, a key that matches at least one
    /// existing object when treated as a prefix yields
    /// [`Attributes::PseudoDirectory`]; otherwise the read fails with
    /// [`Error::NotFound`]. Transport failures from the store propagate
    /// unchanged.
    pub async fn read_attributes(&self) -> Result<Attributes> {
        let bucket = self.address.bucket();
        let key = self.address.key();
        debug!("reading attributes for {}", self.address);

        match self.store.lookup_object(bucket, key).await {
            Ok(meta) => Ok(Attributes::Object(ObjectAttributes::from(meta))),
            Err(err) if err.is_not_found() => {
                let prefix = self.address.as_prefix();
                if self.store.prefix_exists(bucket, &prefix).await? {
                    debug!("{} resolves to a pseudo-directory", self.address);
                    Ok(Attributes::PseudoDirectory(PseudoDirectoryAttributes::new(
                        prefix,
                    )))
                } else {
                    Err(Error::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    })
                }
            }
            Err(err) => Err(err),
        }
    }
}

impl PartialEq for ObjectAttributeView {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for ObjectAttributeView {}

impl Hash for ObjectAttributeView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Debug for ObjectAttributeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectAttributeView")
            .field("address", &self.address)
            .finish()
    }
}
