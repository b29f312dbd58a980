//! ECDSA signing with a caller-supplied bound nonce, and verification.
//!
//! Unlike RFC6979-style signing, the nonce here is not derived from the
//! message: it arrives pre-bound to a commitment factor and data hash
//! (see [`crate::ec::commitment`]). Signatures are canonicalized to
//! low-S form and carry an optional recovery id.

use k256::elliptic_curve::PrimeField;
use k256::{ProjectivePoint, Scalar};
use zeroize::Zeroize;

use crate::ec::der;
use crate::ec::public_key::PublicKey;
use crate::ec::{
    add_be, is_less_than, is_zero, point_coordinates, scalar_from_digest, BoundNonce, SecretKey,
    CURVE_ORDER, FIELD_PRIME, HALF_ORDER,
};
use crate::S2cError;

/// An ECDSA signature with R and S components and an optional recovery id.
///
/// R and S are held as 32-byte big-endian values. S is canonicalized to
/// the low half of the scalar range at signing time. The recovery id is
/// present only on freshly produced signatures; it encodes
/// `(field-reduction-overflow << 1) | (R.y parity)`, with the low bit
/// flipped whenever S was negated into low form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
    /// Recovery id in {0, 1, 2, 3}, if known.
    recovery_id: Option<u8>,
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// # Arguments
    /// * `r` - The R component (32 bytes, big-endian).
    /// * `s` - The S component (32 bytes, big-endian).
    ///
    /// # Returns
    /// A new `Signature` with no recovery id.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature {
            r,
            s,
            recovery_id: None,
        }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Access the recovery id, if this signature carries one.
    pub fn recovery_id(&self) -> Option<u8> {
        self.recovery_id
    }

    /// Sign a 32-byte message hash with an explicit bound nonce.
    ///
    /// Computes `R = nonce · G`, `r = R.x mod n`, and
    /// `s = nonce⁻¹ · (message + r · secret) mod n`, negating S into the
    /// low half of the scalar range. Fails with [`S2cError::InvalidNonce`]
    /// if the nonce is zero or either signature component reduces to
    /// zero (cryptographically negligible, but checked). Sensitive
    /// intermediates are scrubbed before returning.
    ///
    /// # Arguments
    /// * `secret` - The signing key.
    /// * `message` - The 32-byte message hash, reduced to a scalar.
    /// * `nonce` - The bound nonce for this signature.
    ///
    /// # Returns
    /// A low-S signature with its recovery id, or an error.
    pub fn sign_with_nonce(
        secret: &SecretKey,
        message: &[u8; 32],
        nonce: &BoundNonce,
    ) -> Result<Self, S2cError> {
        if nonce.scalar == Scalar::ZERO {
            return Err(S2cError::InvalidNonce);
        }

        let point = ProjectivePoint::GENERATOR * nonce.scalar;
        let (rx, ry) = point_coordinates(&point).ok_or(S2cError::InvalidNonce)?;

        // R.x may exceed the group order before reduction; only 1 in
        // about 2^127 points do, but the recovery id must record it.
        let overflow = !is_less_than(&rx, &CURVE_ORDER);
        let r_scalar = scalar_from_digest(&rx);
        if r_scalar == Scalar::ZERO {
            return Err(S2cError::InvalidNonce);
        }
        let mut recovery_id = ((overflow as u8) << 1) | (ry[31] & 1);

        let msg_scalar = scalar_from_digest(message);
        let mut nonce_inv =
            Option::<Scalar>::from(nonce.scalar.invert()).ok_or(S2cError::InvalidNonce)?;
        let mut acc = msg_scalar + r_scalar * secret.to_scalar();
        let mut s_scalar = nonce_inv * acc;
        nonce_inv.zeroize();
        acc.zeroize();

        let mut s = [0u8; 32];
        s.copy_from_slice(&s_scalar.to_bytes());
        if is_less_than(&HALF_ORDER, &s) {
            s_scalar = -s_scalar;
            s.copy_from_slice(&s_scalar.to_bytes());
            recovery_id ^= 1;
        }
        if is_zero(&s) {
            return Err(S2cError::InvalidNonce);
        }

        let mut r = [0u8; 32];
        r.copy_from_slice(&r_scalar.to_bytes());

        Ok(Signature {
            r,
            s,
            recovery_id: Some(recovery_id),
        })
    }

    /// Verify this signature against a 32-byte message hash and public key.
    ///
    /// Standard ECDSA verification: `R' = s⁻¹·message · G + s⁻¹·r · P`,
    /// accepting iff R' is finite and its x-coordinate equals r as an
    /// integer, or equals `r + n` when that sum is still below the field
    /// prime. The second branch recovers the rare case where the true
    /// x-coordinate exceeded the group order before reduction.
    ///
    /// # Arguments
    /// * `public_key` - The signer's public key.
    /// * `message` - The 32-byte message hash, reduced to a scalar.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, public_key: &PublicKey, message: &[u8; 32]) -> bool {
        let maybe_r: Option<Scalar> = Scalar::from_repr(self.r.into()).into();
        let maybe_s: Option<Scalar> = Scalar::from_repr(self.s.into()).into();
        let (r_scalar, s_scalar) = match (maybe_r, maybe_s) {
            (Some(r), Some(s)) => (r, s),
            _ => return false,
        };
        if r_scalar == Scalar::ZERO || s_scalar == Scalar::ZERO {
            return false;
        }

        let s_inv = match Option::<Scalar>::from(s_scalar.invert()) {
            Some(inv) => inv,
            None => return false,
        };
        let u1 = s_inv * scalar_from_digest(message);
        let u2 = s_inv * r_scalar;
        let candidate =
            ProjectivePoint::GENERATOR * u1 + public_key.to_projective() * u2;

        let (cx, _cy) = match point_coordinates(&candidate) {
            Some(coords) => coords,
            None => return false,
        };

        if cx == self.r {
            return true;
        }
        // r + n may still be a valid x-coordinate if it stays below the
        // field prime.
        let (r_plus_n, carry) = add_be(&self.r, &CURVE_ORDER);
        carry == 0 && is_less_than(&r_plus_n, &FIELD_PRIME) && r_plus_n == cx
    }

    /// Parse a strict DER-encoded ECDSA signature.
    ///
    /// See [`crate::ec::der`] for the exact rules. Integers that
    /// overflow 32 bytes or the group order decode structurally but
    /// coerce to zero; such signatures fail verification.
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` (without recovery id) on success, or
    /// [`S2cError::MalformedEncoding`] on any structural violation.
    pub fn from_der(bytes: &[u8]) -> Result<Self, S2cError> {
        let (r, s) = der::decode(bytes)?;
        Ok(Signature {
            r,
            s,
            recovery_id: None,
        })
    }

    /// Serialize the signature in DER format.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded (r, s) pair.
    pub fn to_der(&self) -> Vec<u8> {
        der::encode(&self.r, &self.s)
    }

    /// Serialize the signature in DER format into a caller buffer.
    ///
    /// # Arguments
    /// * `out` - The destination buffer.
    ///
    /// # Returns
    /// The number of bytes written, or [`S2cError::BufferTooSmall`] with
    /// the required size — in which case nothing is written.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<usize, S2cError> {
        der::encode_into(&self.r, &self.s, out)
    }

    /// Return the exact DER-encoded size of this signature in bytes.
    pub fn encoded_len(&self) -> usize {
        der::encoded_len(&self.r, &self.s)
    }
}
