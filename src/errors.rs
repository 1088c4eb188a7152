//! Crate-wide error taxonomy.
//!
//! `NotFound` is the only condition this crate synthesizes itself; transport
//! failures from the remote store pass through untranslated, and the
//! `Invalid*` variants are raised before any network call is made.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The address resolves to neither a concrete object nor a prefix with
    /// at least one object under it.
    #[error("object `{key}` not found in bucket `{bucket}`")]
    NotFound { bucket: String, key: String },

    #[error("invalid bucket name `{name}`: {reason}")]
    InvalidBucketName { name: String, reason: String },

    #[error("invalid object key `{key}`: {reason}")]
    InvalidObjectKey { key: String, reason: String },

    #[error("invalid storage uri `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Network, authentication, or malformed-response failure reported by
    /// the remote store collaborator.
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed wire representation of an options record.
    #[error("invalid wire record: {0}")]
    Wire(#[from] serde_json::Error),
}

impl Error {
    /// True for the catchable missing-object condition, and nothing else.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// True for argument-validation failures raised before any remote call.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidBucketName { .. }
                | Error::InvalidObjectKey { .. }
                | Error::InvalidUri { .. }
        )
    }
}
