#![deny(unsafe_code)]

use std::fmt;

/// Stable identity key of a canonical book.
///
/// Either a checksum-valid ISBN-13 or the lowercase hex rendering of a
/// SHA-256 digest over the book's key fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(String);

impl BookId {
    /// Use a validated ISBN-13 as the identity.
    pub fn from_isbn13(isbn13: impl Into<String>) -> Self {
        Self(isbn13.into())
    }

    /// Render a SHA-256 digest as the identity.
    pub fn from_sha256(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity is a hash fallback rather than an ISBN-13.
    pub fn is_hash_fallback(&self) -> bool {
        self.0.len() == 64
    }
}

impl serde::Serialize for BookId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for BookId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(serde::de::Error::custom("book_id must not be empty"));
        }
        Ok(Self(s))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_renders_lowercase_hex() {
        let id = BookId::from_sha256([0xab; 32]);
        assert_eq!(id.as_str().len(), 64);
        assert!(id.as_str().starts_with("abab"));
        assert!(id.is_hash_fallback());
    }

    #[test]
    fn isbn_identity_is_not_fallback() {
        let id = BookId::from_isbn13("9780132350884");
        assert_eq!(id.to_string(), "9780132350884");
        assert!(!id.is_hash_fallback());
    }
}
