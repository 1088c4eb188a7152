//! Attribute records returned by a successful read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::store::ObjectMetadata;

/// Attributes of a concrete stored object, populated from the store's
/// metadata response. Extension fields are present only when the backing
/// object carries them.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAttributes {
    /// Size in bytes.
    pub size: u64,

    pub created: Option<DateTime<Utc>>,

    pub updated: Option<DateTime<Utc>>,

    /// Base64-encoded MD5 of the content, if available.
    pub etag: Option<String>,

    pub content_type: Option<String>,

    pub content_encoding: Option<String>,

    pub content_disposition: Option<String>,

    pub content_language: Option<String>,

    /// Cache-control directive attached at write time.
    pub cache_control: Option<String>,

    pub version_id: Option<String>,

    /// User-defined key-value metadata entries.
    pub user_metadata: BTreeMap<String, String>,
}

impl From<ObjectMetadata> for ObjectAttributes {
    fn from(meta: ObjectMetadata) -> Self {
        Self {
            size: meta.size,
            created: meta.created,
            updated: meta.updated,
            etag: meta.etag,
            content_type: meta.content_type,
            content_encoding: meta.content_encoding,
            content_disposition: meta.content_disposition,
            content_language: meta.content_language,
            cache_control: meta.cache_control,
            version_id: meta.version_id,
            user_metadata: meta.user_metadata,
        }
    }
}

/// Attributes of a synthetic hierarchy node with no concrete backing
/// object, inferred from existing key prefixes. Reports zero size and no
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoDirectoryAttributes {
    /// The prefix (with trailing separator) this node was inferred from.
    pub prefix: String,
}

impl PseudoDirectoryAttributes {
    pub(crate) fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn size(&self) -> u64 {
        0
    }
}

/// Result of a successful read: exactly one of the two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Attributes {
    Object(ObjectAttributes),
    PseudoDirectory(PseudoDirectoryAttributes),
}

impl Attributes {
    pub fn is_directory(&self) -> bool {
        matches!(self, Attributes::PseudoDirectory(_))
    }

    pub fn size(&self) -> u64 {
        match self {
            Attributes::Object(attrs) => attrs.size,
            Attributes::PseudoDirectory(attrs) => attrs.size(),
        }
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        match self {
            Attributes::Object(attrs) => attrs.created,
            Attributes::PseudoDirectory(_) => None,
        }
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        match self {
            Attributes::Object(attrs) => attrs.updated,
            Attributes::PseudoDirectory(_) => None,
        }
    }

    pub fn etag(&self) -> Option<&str> {
        match self {
            Attributes::Object(attrs) => attrs.etag.as_deref(),
            Attributes::PseudoDirectory(_) => None,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            Attributes::Object(attrs) => attrs.content_type.as_deref(),
            Attributes::PseudoDirectory(_) => None,
        }
    }

    pub fn cache_control(&self) -> Option<&str> {
        match self {
            Attributes::Object(attrs) => attrs.cache_control.as_deref(),
            Attributes::PseudoDirectory(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_variant_surfaces_metadata() {
        let attrs: ObjectAttributes = ObjectMetadata {
            size: 9,
            cache_control: Some("potato".to_string()),
            ..Default::default()
        }
        .into();
        let attrs = Attributes::Object(attrs);

        assert!(!attrs.is_directory());
        assert_eq!(attrs.size(), 9);
        assert_eq!(attrs.cache_control(), Some("potato"));
    }

    #[test]
    fn pseudo_directory_reports_directory_defaults() {
        let attrs = Attributes::PseudoDirectory(PseudoDirectoryAttributes::new("rum/"));

        assert!(attrs.is_directory());
        assert_eq!(attrs.size(), 0);
        assert_eq!(attrs.created(), None);
        assert_eq!(attrs.updated(), None);
        assert_eq!(attrs.etag(), None);
        assert_eq!(attrs.cache_control(), None);
    }
}
