use crate::election::Election;
use crate::error::Result;
use crate::txshape::TxId;
use crate::validator::{ValidatorChange, ValidatorSet};
use crate::vote::Vote;

/// Result of a concluded election, persisted once at the height it
/// crossed the supermajority threshold (`spec.md` §3 / §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionResult {
    pub election_id: TxId,
    pub height_concluded: u64,
    pub effect_digest: Option<String>,
}

/// Validator-set change handed back to whatever drives the consensus
/// engine. The exact wire shape beyond "a validator set" is the
/// concluded election subtype's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorUpdate {
    pub validators: Vec<(election_crypto::PublicKey, u64)>,
}

/// The facade the election subsystem consumes from its host chain
/// (`spec.md` §6). Every method here is a read except
/// `store_election_results`, which is the single write the Approval
/// Driver performs, at the block's commit boundary.
pub trait ChainView {
    /// Height of the most recently committed block, if any.
    fn latest_height(&self) -> Option<u64>;

    /// The most recent validator-set change relative to the latest
    /// committed block, if the validator set has ever changed.
    fn get_validator_change(&self, height: u64) -> Option<ValidatorChange>;

    /// Validator set at `height`, or the latest known set if `None`.
    /// Already decoded into ed25519 `PublicKey`s — decoding whatever wire
    /// encoding (e.g. base64) the consensus feed uses is this method's
    /// implementor's job, not the election subsystem's.
    fn get_validators(&self, height: Option<u64>) -> ValidatorSet;

    fn is_committed(&self, tx_id: &TxId) -> bool;

    /// Height(s) of the block(s) containing `tx_id`; empty if uncommitted.
    fn get_block_containing_tx(&self, tx_id: &TxId) -> Vec<u64>;

    fn get_election_transaction(&self, tx_id: &TxId) -> Option<Election>;

    fn get_election(&self, id: &TxId) -> Option<ElectionResult>;

    /// Idempotent under (election_id, height): calling this twice for the
    /// same pair must not double-apply anything.
    fn store_election_results(&mut self, height: u64, result: ElectionResult) -> Result<()>;

    /// Committed votes whose outputs are addressed to `election_pk` under
    /// the asset id `asset_id` (the election's id).
    fn get_asset_tokens_for_public_key(&self, asset_id: &TxId, election_pk: &str) -> Vec<Vote>;
}
