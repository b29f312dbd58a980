//! Hash primitives for sign-to-contract timestamping.
//!
//! Provides the domain-separated commitment hash (a fixed-midstate
//! SHA-256 used to fold a commitment factor and a data hash into a nonce
//! tweak), plus the plain SHA-256 and SHA3-256 digests used for message
//! hashes and outer data hashes respectively.

use sha2::compress256;
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

/// Precomputed SHA-256 internal state for the commitment hash domain.
///
/// Equivalent to a tagged hash: the eight state words are the midstate of
/// SHA-256 after absorbing a fixed 64-byte domain tag, so the tag never
/// has to be re-hashed per call. Any interoperable implementation must
/// start from exactly this state with 64 bytes already counted.
const COMMITMENT_MIDSTATE: [u32; 8] = [
    0x9cecba11, 0x23925381, 0x11679112, 0xd1627e0f,
    0x97c87550, 0x003cc765, 0x90f61164, 0x33e9b66a,
];

/// Bytes counted as already absorbed when starting from the midstate.
const MIDSTATE_BYTES: u64 = 64;

/// Compute the domain-separated commitment hash of a factor and a data hash.
///
/// The two 32-byte inputs fill exactly one SHA-256 block, which is
/// compressed against [`COMMITMENT_MIDSTATE`]; a final padding block
/// closes the hash with a total message length of 128 bytes (the 64
/// pre-absorbed tag bytes plus the 64 input bytes).
///
/// # Arguments
/// * `factor` - The 32-byte public commitment factor.
/// * `data_hash` - The 32-byte hash of the data being timestamped.
///
/// # Returns
/// A 32-byte digest, bit-for-bit compatible with the reference scheme.
pub fn commitment_hash(factor: &[u8; 32], data_hash: &[u8; 32]) -> [u8; 32] {
    let mut state = COMMITMENT_MIDSTATE;

    let mut block = [0u8; 64];
    block[..32].copy_from_slice(factor);
    block[32..].copy_from_slice(data_hash);
    compress256(&mut state, core::slice::from_ref(GenericArray::from_slice(&block)));

    // SHA-256 padding for a message of MIDSTATE_BYTES + 64 bytes total.
    let total_bits = (MIDSTATE_BYTES + 64) * 8;
    let mut pad = [0u8; 64];
    pad[0] = 0x80;
    pad[56..].copy_from_slice(&total_bits.to_be_bytes());
    compress256(&mut state, core::slice::from_ref(GenericArray::from_slice(&pad)));

    let mut out = [0u8; 32];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Compute SHA-256 of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA3-256 of the input data.
///
/// This is the digest the outer timestamping workflow applies to raw
/// file bytes before binding them into a nonce.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA3-256 digest.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- commitment hash ----

    #[test]
    fn test_commitment_hash_golden() {
        let digest = commitment_hash(&[0u8; 32], &[0u8; 32]);
        assert_eq!(
            hex::encode(digest),
            "d53d5f0167f9ebb8b4ccef81a7b99e9cce7868e8f2cf67d0c17a8d4cd583c7a2"
        );
    }

    #[test]
    fn test_commitment_hash_input_order_matters() {
        let a = [0x11u8; 32];
        let b = [0x22u8; 32];
        assert_ne!(commitment_hash(&a, &b), commitment_hash(&b, &a));
    }

    #[test]
    fn test_commitment_hash_differs_from_plain_sha256() {
        // The fixed midstate must not degenerate to the generic IV.
        let input = [0u8; 64];
        assert_ne!(commitment_hash(&[0u8; 32], &[0u8; 32]), sha256(&input));
    }

    // ---- SHA-256 ----

    #[test]
    fn test_sha256_empty_string() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_string() {
        assert_eq!(
            hex::encode(sha256(b"this is the data I want to hash")),
            "f88eec7ecabf88f9a64c4100cac1e0c0c4581100492137d1b656ea626cad63e3"
        );
    }

    // ---- SHA3-256 ----

    #[test]
    fn test_sha3_256_empty_string() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_sha3_256_string() {
        assert_eq!(
            hex::encode(sha3_256(b"this is the data I want to hash")),
            "eced318f21f8c185f8be7ac35bebfd23227df89a8a2a0bee314d8758ad0436d0"
        );
    }
}
