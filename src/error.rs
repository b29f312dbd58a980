/// Unified error type for all sign-to-contract primitive operations.
///
/// Covers errors from key handling, nonce binding, signing, and the
/// strict DER signature codec. Every failure is deterministic and local:
/// retrying with the same inputs reproduces the same error.
#[derive(Debug, thiserror::Error)]
pub enum S2cError {
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("derived nonce produced a zero signature component")]
    InvalidNonce,

    #[error("malformed signature encoding: {0}")]
    MalformedEncoding(String),

    #[error("output buffer too small: need {required} bytes, got {got}")]
    BufferTooSmall { required: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for S2cError {
    fn from(e: hex::FromHexError) -> Self {
        S2cError::InvalidHex(e.to_string())
    }
}
