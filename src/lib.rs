/// Sign-to-contract data timestamping primitives for secp256k1.
///
/// This crate provides the commitment-binding core of a verifiable
/// data-timestamping scheme: the hash of an arbitrary byte sequence is
/// cryptographically bound into the nonce used to produce an ECDSA
/// signature, so the signature itself witnesses that the data existed
/// no later than the signature's public appearance.
///
/// Building blocks:
/// - Domain-separated commitment hash (fixed-midstate SHA-256)
/// - Commitment factor derivation and nonce binding
/// - ECDSA signing with a caller-supplied bound nonce, and verification
/// - Strict canonical DER encoding/decoding of (r, s) signatures
/// - Commitment verification against a signature's r component
///
/// Wallet key management, transaction assembly, and file I/O are outside
/// this crate: callers supply secret scalars and 32-byte data hashes and
/// persist the published (factor, signature, data hash) triple themselves.

pub mod hash;
pub mod datahash;
pub mod ec;

mod error;
pub use error::S2cError;
