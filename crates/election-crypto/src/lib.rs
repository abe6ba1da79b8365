//! Cryptographic primitives for the election subsystem: ed25519 public
//! keys and signatures, SHA-256 transaction hashing, and the base58 key
//! derivation used to address election tokens.
//!
//! Signature *verification* algorithms live here (they're a pure
//! function of already-decoded bytes); the base transaction model that
//! decides which bytes to verify against stays external to this crate.

pub mod election_key;
pub mod error;
pub mod hash;
pub mod pubkey;
pub mod signature;

pub use election_key::derive_election_pk;
pub use error::{CryptoError, Result};
pub use hash::sha256_hex;
pub use pubkey::PublicKey;
pub use signature::{sign_message, verify_signature, Signature};
