//! Elliptic-curve layer: keys, commitment binding, signing, and the
//! strict DER signature codec, all over secp256k1 via `k256`.

pub mod secret_key;
pub mod public_key;
pub mod commitment;
pub mod signature;
pub mod der;

pub use secret_key::SecretKey;
pub use public_key::PublicKey;
pub use commitment::{BoundNonce, CommitmentFactor};
pub use signature::Signature;

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar};

/// The secp256k1 group order N, big-endian.
/// N = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub(crate) const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the group order (N/2), used for low-S canonicalization.
pub(crate) const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// The secp256k1 field prime P, big-endian.
/// P = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
pub(crate) const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
    0xFC, 0x2F,
];

/// Interpret a 32-byte big-endian digest as a scalar, reduced mod N.
///
/// Wraparound is accepted (no rejection sampling), matching the
/// reference scheme's field-to-scalar conversions.
///
/// # Arguments
/// * `digest` - A 32-byte big-endian value.
///
/// # Returns
/// The value reduced into [0, N).
pub fn scalar_from_digest(digest: &[u8; 32]) -> Scalar {
    let uint = k256::U256::from_be_slice(digest);
    <Scalar as Reduce<k256::U256>>::reduce(uint)
}

/// Extract the normalized affine coordinates of a point as big-endian bytes.
///
/// # Arguments
/// * `point` - A projective point.
///
/// # Returns
/// `Some((x, y))` for any finite point, `None` for the point at infinity.
pub(crate) fn point_coordinates(point: &ProjectivePoint) -> Option<([u8; 32], [u8; 32])> {
    if bool::from(point.is_identity()) {
        return None;
    }
    let encoded = point.to_affine().to_encoded_point(false);
    let (ex, ey) = (encoded.x()?, encoded.y()?);
    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(ex);
    y.copy_from_slice(ey);
    Some((x, y))
}

/// Check whether a 32-byte big-endian integer is zero.
pub(crate) fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
pub(crate) fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    for i in 0..32 {
        if a[i] < b[i] {
            return true;
        }
        if a[i] > b[i] {
            return false;
        }
    }
    false // equal
}

/// Add two 32-byte big-endian integers, returning the sum and carry bit.
pub(crate) fn add_be(a: &[u8; 32], b: &[u8; 32]) -> ([u8; 32], u8) {
    let mut sum = [0u8; 32];
    let mut carry = 0u16;
    for i in (0..32).rev() {
        let t = a[i] as u16 + b[i] as u16 + carry;
        sum[i] = t as u8;
        carry = t >> 8;
    }
    (sum, carry as u8)
}
