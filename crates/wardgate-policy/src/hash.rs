//! policy hash type - 32-byte SHA-256 digest over canonical policy content.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use sha2::{Digest, Sha256};

/// length of a policy hash in bytes (SHA-256).
pub const POLICY_HASH_LEN: usize = 32;

/// 32-byte SHA-256 digest identifying one compiled policy's content.
///
/// computed over the canonical resource entries only; compile timestamps
/// and version numbers are never part of the hashed bytes, so the hash
/// detects meaningful policy change rather than wall-clock change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PolicyHash([u8; POLICY_HASH_LEN]);

impl PolicyHash {
    /// hash canonical policy bytes.
    pub fn digest(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// returns the hash as a byte slice.
    pub fn as_bytes(&self) -> &[u8; POLICY_HASH_LEN] {
        &self.0
    }
}

impl From<[u8; POLICY_HASH_LEN]> for PolicyHash {
    fn from(bytes: [u8; POLICY_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PolicyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PolicyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyHash({})", hex::encode(self.0))
    }
}

impl Serialize for PolicyHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PolicyHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(de::Error::custom)?;
        let bytes: [u8; POLICY_HASH_LEN] = bytes
            .try_into()
            .map_err(|_| de::Error::custom("policy hash must be 32 bytes"))?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let a = PolicyHash::digest(b"payload");
        let b = PolicyHash::digest(b"payload");
        assert_eq!(a, b);
        assert_ne!(a, PolicyHash::digest(b"other payload"));
    }

    #[test]
    fn test_hex_display() {
        let hash = PolicyHash::digest(b"");
        let hex = hash.to_string();
        assert_eq!(hex.len(), 64);
        // sha-256 of the empty string
        assert_eq!(
            hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let hash = PolicyHash::digest(b"payload");
        let json = serde_json::to_string(&hash).unwrap();
        let back: PolicyHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, back);

        let bad: Result<PolicyHash, _> = serde_json::from_str("\"abcd\"");
        assert!(bad.is_err());
    }
}
