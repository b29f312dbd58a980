//! Data hash type for timestamped content.
//!
//! Provides `DataHash` — a 32-byte digest of the content being
//! timestamped, displayed as plain big-endian hex. The outer workflow
//! computes it by hashing raw file bytes with SHA3-256; this crate only
//! treats it as an opaque 32-byte value bound into signature nonces.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use crate::hash::sha3_256;
use crate::S2cError;

/// Size of a DataHash in bytes.
pub const DATA_HASH_SIZE: usize = 32;

/// A 32-byte digest of timestamped content.
///
/// Displayed as 64 lowercase hex characters in natural (big-endian)
/// byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct DataHash([u8; DATA_HASH_SIZE]);

impl DataHash {
    /// Create a DataHash from a raw 32-byte array.
    ///
    /// # Arguments
    /// * `bytes` - The 32 digest bytes.
    ///
    /// # Returns
    /// A new `DataHash`.
    pub fn new(bytes: [u8; DATA_HASH_SIZE]) -> Self {
        DataHash(bytes)
    }

    /// Compute the DataHash of a byte sequence using SHA3-256.
    ///
    /// This matches the digest the reference timestamping workflow
    /// applies to file contents.
    ///
    /// # Arguments
    /// * `data` - The raw content bytes.
    ///
    /// # Returns
    /// A `DataHash` holding the SHA3-256 digest of `data`.
    pub fn of(data: &[u8]) -> Self {
        DataHash(sha3_256(data))
    }

    /// Create a DataHash from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(DataHash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S2cError> {
        if bytes.len() != DATA_HASH_SIZE {
            return Err(S2cError::InvalidInput(format!(
                "invalid data hash length of {}, want {}",
                bytes.len(),
                DATA_HASH_SIZE
            )));
        }
        let mut arr = [0u8; DATA_HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(DataHash(arr))
    }

    /// Create a DataHash from a 64-character hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Hex string in natural byte order.
    ///
    /// # Returns
    /// `Ok(DataHash)` on success, or an error for invalid input.
    pub fn from_hex(hex_str: &str) -> Result<Self, S2cError> {
        let decoded = hex::decode(hex_str)?;
        Self::from_bytes(&decoded)
    }

    /// Access the internal byte array as a reference.
    ///
    /// # Returns
    /// A reference to the 32-byte internal array.
    pub fn as_bytes(&self) -> &[u8; DATA_HASH_SIZE] {
        &self.0
    }

    /// Return a copy of the internal bytes.
    ///
    /// # Returns
    /// The 32 digest bytes by value.
    pub fn to_bytes(&self) -> [u8; DATA_HASH_SIZE] {
        self.0
    }
}

impl fmt::Display for DataHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for DataHash {
    type Err = S2cError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataHash::from_hex(s)
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for DataHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de> Deserialize<'de> for DataHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DataHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_hash_of_matches_sha3() {
        let hash = DataHash::of(b"this is the data I want to hash");
        assert_eq!(
            hash.to_string(),
            "eced318f21f8c185f8be7ac35bebfd23227df89a8a2a0bee314d8758ad0436d0"
        );
    }

    #[test]
    fn test_data_hash_hex_roundtrip() {
        let hex_str = "23ce98d08ab181f2418f05665aeeb45e46ffc536df70de6aaa93d32a1b4d6f93";
        let hash = DataHash::from_hex(hex_str).unwrap();
        assert_eq!(hash.to_string(), hex_str);
        assert_eq!(hash, hex_str.parse().unwrap());
    }

    #[test]
    fn test_data_hash_rejects_bad_input() {
        // Wrong length.
        assert!(DataHash::from_hex("23ce98d0").is_err());
        // Invalid hex character.
        assert!(DataHash::from_hex(
            "zzce98d08ab181f2418f05665aeeb45e46ffc536df70de6aaa93d32a1b4d6f93"
        )
        .is_err());
        // Wrong byte slice length.
        assert!(DataHash::from_bytes(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_data_hash_json_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct Stamp {
            data_hash: DataHash,
        }

        let stamp = Stamp {
            data_hash: DataHash::of(b"hello"),
        };
        let json = serde_json::to_string(&stamp).unwrap();
        let back: Stamp = serde_json::from_str(&json).unwrap();
        assert_eq!(stamp.data_hash, back.data_hash);
    }
}
