//! secp256k1 public key for signature verification.
//!
//! Supports compressed/uncompressed SEC1 serialization and hex
//! round-trips. Verification itself lives on [`Signature`], mirrored
//! here for convenience.
//!
//! [`Signature`]: crate::ec::signature::Signature

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};
use std::fmt;

use crate::ec::signature::Signature;
use crate::S2cError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
///
/// Wraps a curve point and provides SEC1 serialization in compressed and
/// uncompressed form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// The affine curve point. Never the point at infinity.
    inner: AffinePoint,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't
    /// represent a valid point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, S2cError> {
        if bytes.is_empty() {
            return Err(S2cError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| S2cError::InvalidPublicKey(e.to_string()))?;
        if encoded.is_identity() {
            return Err(S2cError::InvalidPublicKey(
                "point at infinity".to_string(),
            ));
        }
        let maybe: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
        let point = maybe.ok_or(S2cError::InvalidPublicKey(
            "point not on curve".to_string(),
        ))?;
        Ok(PublicKey { inner: point })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string of a compressed (66 chars) or uncompressed (130 chars) key.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the hex or point is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, S2cError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the
    /// 32-byte X coordinate.
    ///
    /// # Returns
    /// A 33-byte array containing the compressed public key.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by 32-byte X and 32-byte Y coordinates.
    ///
    /// # Returns
    /// A 65-byte array containing the uncompressed public key.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string (compressed format).
    ///
    /// # Returns
    /// A 66-character hex string of the compressed public key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Verify an ECDSA signature against a 32-byte message hash.
    ///
    /// # Arguments
    /// * `message` - The 32-byte message hash that was signed.
    /// * `sig` - The signature to verify.
    ///
    /// # Returns
    /// `true` if the signature is valid for this hash and public key.
    pub fn verify(&self, message: &[u8; 32], sig: &Signature) -> bool {
        sig.verify(self, message)
    }

    /// Build the public key for a secret scalar.
    pub(crate) fn from_secret_scalar(scalar: &Scalar) -> Self {
        let point = (ProjectivePoint::GENERATOR * scalar).to_affine();
        PublicKey { inner: point }
    }

    /// Access the point in projective form for verification arithmetic.
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint::from(self.inner)
    }
}

/// Display as compressed SEC1 hex.
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
