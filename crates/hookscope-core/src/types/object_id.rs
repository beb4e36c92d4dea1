use std::fmt;

use serde::{Serialize, Serializer};

/// Length of a hex-encoded SHA-1 object name.
pub const OID_HEX_LEN: usize = 40;

/// A commit object name as git prints it: 40 lowercase hex characters.
///
/// The all-zero value is the sentinel git uses in hook input for a ref
/// that does not exist on one side of the update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parses a full hex object name, normalising to lowercase.
    ///
    /// Returns `None` for anything that is not exactly 40 hex digits.
    pub fn parse(hex: &str) -> Option<Self> {
        if hex.len() != OID_HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(hex.to_ascii_lowercase()))
    }

    /// The `0000…0000` sentinel meaning "ref absent".
    pub fn null() -> Self {
        Self("0".repeat(OID_HEX_LEN))
    }

    pub fn is_null(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The seven-character abbreviation used in log and report messages.
    pub fn short(&self) -> &str {
        &self.0[..7]
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_full_hex_and_lowercases() {
        let oid = ObjectId::parse("ABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(oid.as_str(), "abcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(oid.short(), "abcdef0");
    }

    #[test]
    fn parse_rejects_short_or_non_hex() {
        assert!(ObjectId::parse("abc123").is_none());
        assert!(ObjectId::parse("g000000000000000000000000000000000000000").is_none());
        assert!(ObjectId::parse("").is_none());
    }

    #[test]
    fn null_sentinel_is_recognised() {
        let null = ObjectId::null();
        assert!(null.is_null());
        assert_eq!(null.as_str().len(), OID_HEX_LEN);
        assert_eq!(ObjectId::parse(null.as_str()), Some(null));
        assert!(!ObjectId::parse("0000000000000000000000000000000000000001")
            .unwrap()
            .is_null());
    }
}
