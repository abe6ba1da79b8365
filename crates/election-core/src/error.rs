use thiserror::Error;

/// The election subsystem's error taxonomy (`spec.md` §7). Every variant
/// is fatal to the offending transaction only, never to the block —
/// callers in `election-driver` rely on that distinction when deciding
/// whether to abort a block commit.
#[derive(Error, Debug)]
pub enum ElectionError {
    #[error("invalid schema at `{path}`: {reason}")]
    InvalidSchema { path: String, reason: String },

    #[error("transaction signature is invalid")]
    InvalidSignature,

    #[error("`tx_signers` must be a list instance of length one")]
    MultipleInputsError,

    #[error("public key is not a part of the validator set")]
    InvalidProposer,

    #[error("validator set must be exactly the same as the outputs of the election")]
    UnequalValidatorSet,

    #[error("transaction `{0}` already exists")]
    DuplicateTransaction(String),

    #[error("election id is not valid hex: {0}")]
    InvalidElectionId(String),

    #[error("election subtype `{0}` does not implement on_approval")]
    NotImplemented(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error(transparent)]
    Crypto(#[from] election_crypto::CryptoError),
}

pub type Result<T> = std::result::Result<T, ElectionError>;
