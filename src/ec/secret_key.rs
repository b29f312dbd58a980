//! Secret scalar material for signing and commitment derivation.
//!
//! A `SecretKey` holds a nonzero secp256k1 scalar. The same type serves
//! both roles the timestamping scheme needs: the long-lived signing key
//! and the fresh per-timestamp base scalar whose generator multiple
//! becomes the public commitment factor. Base scalars must never be
//! reused across unrelated data: two bound nonces sharing a base leak it
//! through linear algebra over the scalar field.

use k256::elliptic_curve::PrimeField;
use k256::{NonZeroScalar, Scalar};
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::ec::public_key::PublicKey;
use crate::S2cError;

/// Length of a serialized secret key in bytes.
const SECRET_KEY_BYTES_LEN: usize = 32;

/// A nonzero secp256k1 scalar used as signing key or commitment base.
#[derive(Clone)]
pub struct SecretKey {
    /// The scalar, guaranteed nonzero by construction.
    inner: Scalar,
}

impl SecretKey {
    /// Generate a new random secret key using the OS random number generator.
    ///
    /// # Returns
    /// A new uniformly random nonzero `SecretKey`.
    pub fn random() -> Self {
        let nz = NonZeroScalar::random(&mut OsRng);
        SecretKey { inner: *nz.as_ref() }
    }

    /// Create a secret key from a raw 32-byte big-endian scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice holding the scalar.
    ///
    /// # Returns
    /// `Ok(SecretKey)` if the bytes are a valid nonzero scalar below the
    /// group order, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S2cError> {
        if bytes.len() != SECRET_KEY_BYTES_LEN {
            return Err(S2cError::InvalidSecretKey(format!(
                "expected {} bytes, got {}",
                SECRET_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; SECRET_KEY_BYTES_LEN];
        arr.copy_from_slice(bytes);
        let maybe: Option<Scalar> = Scalar::from_repr(arr.into()).into();
        arr.zeroize();
        let scalar = maybe.ok_or_else(|| {
            S2cError::InvalidSecretKey("scalar out of range".to_string())
        })?;
        if scalar == Scalar::ZERO {
            return Err(S2cError::InvalidSecretKey("scalar is zero".to_string()));
        }
        Ok(SecretKey { inner: scalar })
    }

    /// Create a secret key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the scalar.
    ///
    /// # Returns
    /// `Ok(SecretKey)` on success, or an error if the hex or scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, S2cError> {
        if hex_str.is_empty() {
            return Err(S2cError::InvalidSecretKey(
                "secret key hex is empty".to_string(),
            ));
        }
        let mut bytes = hex::decode(hex_str)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Serialize the secret key as a 32-byte big-endian array.
    ///
    /// # Returns
    /// A 32-byte array containing the scalar. The caller is responsible
    /// for scrubbing the copy.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES_LEN] {
        let mut out = [0u8; SECRET_KEY_BYTES_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Derive the corresponding public key for this secret key.
    ///
    /// # Returns
    /// The `PublicKey` at `scalar · G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_scalar(&self.inner)
    }

    /// Access the scalar for arithmetic within the crate.
    pub(crate) fn to_scalar(&self) -> Scalar {
        self.inner
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for SecretKey {}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the scalar.
        f.write_str("SecretKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_roundtrip() {
        let key_bytes: [u8; 32] = [
            0xea, 0xf0, 0x2c, 0xa3, 0x48, 0xc5, 0x24, 0xe6, 0x39, 0x26, 0x55, 0xba, 0x4d, 0x29,
            0x60, 0x3c, 0xd1, 0xa7, 0x34, 0x7d, 0x9d, 0x65, 0xcf, 0xe9, 0x3c, 0xe1, 0xeb, 0xff,
            0xdc, 0xa2, 0x26, 0x94,
        ];
        let key = SecretKey::from_bytes(&key_bytes).unwrap();
        assert_eq!(key.to_bytes(), key_bytes);

        let key2 = SecretKey::from_hex(&hex::encode(key_bytes)).unwrap();
        assert_eq!(key, key2);
    }

    #[test]
    fn test_secret_key_rejects_invalid() {
        // Zero scalar.
        assert!(SecretKey::from_bytes(&[0u8; 32]).is_err());
        // Out of range (>= group order).
        assert!(SecretKey::from_bytes(&super::super::CURVE_ORDER).is_err());
        // Wrong length.
        assert!(SecretKey::from_bytes(&[1u8; 31]).is_err());
        // Empty hex.
        assert!(SecretKey::from_hex("").is_err());
    }

    #[test]
    fn test_random_keys_are_distinct() {
        let a = SecretKey::random();
        let b = SecretKey::random();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_does_not_leak() {
        let key = SecretKey::random();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(&hex::encode(key.to_bytes())));
    }
}
