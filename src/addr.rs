//! Addresses for locations in a remote object store.

use std::fmt;

use crate::errors::{Error, Result};

/// URI scheme for addresses in the remote store.
pub const SCHEME: &str = "gs";

const MAX_OBJECT_KEY_LEN: usize = 1024;
const BUCKET_NAME_MIN_LEN: usize = 3;
const BUCKET_NAME_MAX_LEN: usize = 63;

/// A (bucket, key) pair identifying one location in the remote store.
///
/// Addresses are immutable value objects: two addresses are equal iff their
/// bucket and key are equal, independent of whether anything exists at the
/// location. The key may be empty (the bucket root) and may carry a trailing
/// `/` (a directory-style address); both are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectAddress {
    bucket: String,
    key: String,
}

impl ObjectAddress {
    /// Build an address from its parts, validating both.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();
        ensure_bucket_name_safe(&bucket)?;
        ensure_key_safe(&key)?;
        Ok(Self { bucket, key })
    }

    /// Parse a `gs://bucket/key` URI into an address.
    ///
    /// `gs://bucket` and `gs://bucket/` both denote the bucket root.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri.strip_prefix("gs://").ok_or_else(|| Error::InvalidUri {
            uri: uri.to_string(),
            reason: format!("expected `{SCHEME}://` scheme"),
        })?;
        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return Err(Error::InvalidUri {
                uri: uri.to_string(),
                reason: "missing bucket name".to_string(),
            });
        }
        Self::new(bucket, key)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The key treated as a hierarchical prefix: a trailing separator is
    /// appended if absent. The empty key maps to the empty prefix, so the
    /// bucket root matches every object in the bucket.
    pub fn as_prefix(&self) -> String {
        if self.key.is_empty() || self.key.ends_with('/') {
            self.key.clone()
        } else {
            format!("{}/", self.key)
        }
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}://{}/{}", self.bucket, self.key)
    }
}

/// Validate bucket name format.
///
/// Enforces the store's naming rules:
/// - 3–63 characters
/// - lowercase letters, digits, dots, hyphens only
/// - cannot start/end with dot or hyphen
/// - cannot contain consecutive dots or dot-hyphen patterns
/// - cannot look like an IPv4 address
fn ensure_bucket_name_safe(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidBucketName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim() != name {
        return Err(invalid("cannot begin or end with whitespace"));
    }
    if name.len() < BUCKET_NAME_MIN_LEN || name.len() > BUCKET_NAME_MAX_LEN {
        return Err(invalid("must be between 3 and 63 characters"));
    }
    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '-'))
    {
        return Err(invalid(
            "allowed characters are lowercase letters, digits, dots, and hyphens",
        ));
    }
    if name.starts_with('.') || name.ends_with('.') || name.starts_with('-') || name.ends_with('-')
    {
        return Err(invalid("must start and end with a lowercase letter or digit"));
    }
    if name.contains("..") || name.contains("-.") || name.contains(".-") {
        return Err(invalid(
            "cannot contain consecutive dots or dot-hyphen combinations",
        ));
    }
    if is_ipv4_like(name) {
        return Err(invalid("must not be formatted like an IP address"));
    }
    Ok(())
}

/// Key validation to avoid trivial traversal vectors. The empty key is
/// allowed and denotes the bucket root.
fn ensure_key_safe(key: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidObjectKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.len() > MAX_OBJECT_KEY_LEN {
        return Err(invalid("longer than 1024 bytes"));
    }
    if key.starts_with('/') {
        return Err(invalid("cannot begin with `/`"));
    }
    if key.split('/').any(|segment| segment == "..") {
        return Err(invalid("cannot contain `..` segments"));
    }
    if key
        .bytes()
        .any(|b| b.is_ascii_control() || b == b'\\' || b == b'\0')
    {
        return Err(invalid("cannot contain control bytes or backslashes"));
    }
    Ok(())
}

/// Check if a string matches IPv4-like dotted decimal form.
fn is_ipv4_like(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts
        .iter()
        .all(|segment| !segment.is_empty() && segment.parse::<u8>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_uri() {
        let addr = ObjectAddress::parse("gs://red/water").unwrap();
        assert_eq!(addr.bucket(), "red");
        assert_eq!(addr.key(), "water");
        assert_eq!(addr.to_string(), "gs://red/water");
    }

    #[test]
    fn parses_directory_and_root_uris() {
        let dir = ObjectAddress::parse("gs://red/rum/").unwrap();
        assert_eq!(dir.key(), "rum/");
        assert_eq!(dir.as_prefix(), "rum/");

        let root = ObjectAddress::parse("gs://red/").unwrap();
        assert_eq!(root.key(), "");
        assert_eq!(root.as_prefix(), "");

        let bare = ObjectAddress::parse("gs://red").unwrap();
        assert_eq!(bare, root);
    }

    #[test]
    fn prefix_appends_separator() {
        let addr = ObjectAddress::parse("gs://red/rum").unwrap();
        assert_eq!(addr.as_prefix(), "rum/");
    }

    #[test]
    fn equality_is_by_bucket_and_key() {
        let a = ObjectAddress::new("red", "rum").unwrap();
        let b = ObjectAddress::parse("gs://red/rum").unwrap();
        let c = ObjectAddress::new("red", "lol/dog").unwrap();
        let d = ObjectAddress::new("blue", "rum").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn rejects_malformed_inputs() {
        let cases: &[(&str, &str)] = &[
            ("s3://red/water", "wrong scheme"),
            ("gs://", "missing bucket"),
            ("gs:///water", "missing bucket"),
            ("gs://RED/water", "uppercase bucket"),
            ("gs://rd/water", "bucket too short"),
            ("gs://red..blue/water", "consecutive dots"),
            ("gs://-red/water", "leading hyphen"),
            ("gs://1.2.3.4/water", "ipv4-shaped bucket"),
            ("gs://red/../water", "traversal key"),
            ("gs://red/a\\b", "backslash in key"),
        ];
        for (uri, label) in cases {
            let err = ObjectAddress::parse(uri).unwrap_err();
            assert!(err.is_invalid_argument(), "{label}: got {err:?}");
        }
    }

    #[test]
    fn rejects_oversized_key() {
        let key = "k".repeat(1025);
        let err = ObjectAddress::new("red", key).unwrap_err();
        assert!(matches!(err, Error::InvalidObjectKey { .. }));
    }
}
