//! On-chain election subsystem: create-style election transactions that
//! distribute voting tokens over a validator set, transfer-style vote
//! transactions that spend them, and the tally/status machinery a host
//! chain's block-commit path drives to detect a concluded election.

pub mod catalogue;
pub mod chain;
pub mod config;
pub mod election;
pub mod error;
pub mod schema;
pub mod status;
pub mod tally;
pub mod txshape;
pub mod validator;
pub mod vote;

pub use catalogue::{
    ChainMigrationElection, ElectionCatalogue, ElectionEffect, ValidatorSetUpdateElection,
    CHAIN_MIGRATION_ELECTION, VALIDATOR_SET_UPDATE_ELECTION,
};
pub use chain::{ChainView, ElectionResult, ValidatorUpdate};
pub use config::ElectionConfig;
pub use election::Election;
pub use error::{ElectionError, Result};
pub use status::{get_status, has_validator_set_changed, ElectionStatus};
pub use tally::{committed_votes, count_votes};
pub use txshape::{compute_id, Ed25519Verifier, Input, Output, SignatureVerifier, TxId};
pub use validator::{addresses, recipients, total_voting_power, Validator, ValidatorChange, ValidatorSet};
pub use vote::{Vote, VOTE_OPERATION};
