//! Rule-set fingerprints.

use serde::{Serialize, Serializer};
use std::fmt;

/// XXH3-128 fingerprint of a canonical serialization.
///
/// Rendered and serialized as 32 lowercase hex digits, so a wrapper script can
/// compare the `digest` field of two `kiln rules --format json` runs directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u128);

impl ContentHash {
    /// Fingerprints `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:08x}..)", self.0 >> 96)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_for_equal_input() {
        let cmd = b"g++ -o _out/a.o -c src/a.cpp";
        assert_eq!(ContentHash::from_bytes(cmd), ContentHash::from_bytes(cmd));
        assert_ne!(
            ContentHash::from_bytes(b"-O2"),
            ContentHash::from_bytes(b"-O3")
        );
    }

    #[test]
    fn hex_is_zero_padded() {
        let s = ContentHash(0xab).to_string();
        assert_eq!(s.len(), 32);
        assert!(s.starts_with("000000"));
        assert!(s.ends_with("ab"));
    }

    #[test]
    fn debug_shows_leading_digits() {
        let h = ContentHash::from_bytes(b"rules");
        let debug = format!("{h:?}");
        assert_eq!(debug, format!("ContentHash({}..)", &h.to_string()[..8]));
    }

    #[test]
    fn serializes_as_hex_string() {
        let h = ContentHash::from_bytes(b"rules");
        assert_eq!(
            serde_json::to_value(h).unwrap(),
            serde_json::Value::String(h.to_string())
        );
    }
}
