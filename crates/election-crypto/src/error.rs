use thiserror::Error;

/// Cryptographic primitive errors. Kept separate from `ElectionError` in
/// `election-core` since these are failures in key/signature encoding, not
/// in election business logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("invalid base58 encoding: {0}")]
    InvalidBase58(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
