use std::collections::HashMap;

use election_core::{
    ChainView, Election, ElectionResult, Result, TxId, ValidatorChange, ValidatorSet, Vote,
};

/// A reference `ChainView` implementation backed by plain in-memory maps.
/// Exists for tests and for embedding this subsystem in something that
/// doesn't yet have its own block store; a production host chain would
/// replace this with a facade over its own storage layer.
#[derive(Debug, Default)]
pub struct InMemoryChain {
    committed_heights: HashMap<String, Vec<u64>>,
    elections: HashMap<String, Election>,
    results: HashMap<String, ElectionResult>,
    votes: HashMap<String, Vec<Vote>>,
    validator_changes: Vec<ValidatorChange>,
    current_validators: ValidatorSet,
    height: Option<u64>,
}

impl InMemoryChain {
    pub fn new(genesis_validators: ValidatorSet) -> Self {
        Self {
            current_validators: genesis_validators,
            ..Self::default()
        }
    }

    /// Commits `election` as included at `height`.
    pub fn commit_election(&mut self, height: u64, election: Election) {
        self.committed_heights
            .entry(election.id.as_str().to_string())
            .or_default()
            .push(height);
        self.elections
            .insert(election.id.as_str().to_string(), election);
        self.height = Some(self.height.map_or(height, |h| h.max(height)));
    }

    /// Commits a vote under `asset_id` (the election it votes on).
    pub fn commit_vote(&mut self, asset_id: &TxId, vote: Vote) {
        self.votes
            .entry(asset_id.as_str().to_string())
            .or_default()
            .push(vote);
    }

    /// Replaces the current validator set and records the change at
    /// `height`, as a consensus engine would report at block commit.
    pub fn apply_validator_change(&mut self, height: u64, validators: ValidatorSet) {
        self.current_validators = validators.clone();
        self.validator_changes
            .push(ValidatorChange { height, validators });
        self.height = Some(self.height.map_or(height, |h| h.max(height)));
    }

    pub fn advance_height(&mut self, height: u64) {
        self.height = Some(self.height.map_or(height, |h| h.max(height)));
    }
}

impl ChainView for InMemoryChain {
    fn latest_height(&self) -> Option<u64> {
        self.height
    }

    fn get_validator_change(&self, height: u64) -> Option<ValidatorChange> {
        self.validator_changes
            .iter()
            .filter(|change| change.height <= height)
            .max_by_key(|change| change.height)
            .cloned()
    }

    fn get_validators(&self, height: Option<u64>) -> ValidatorSet {
        match height {
            None => self.current_validators.clone(),
            Some(h) => self
                .validator_changes
                .iter()
                .filter(|change| change.height <= h)
                .max_by_key(|change| change.height)
                .map(|change| change.validators.clone())
                .unwrap_or_else(|| self.current_validators.clone()),
        }
    }

    fn is_committed(&self, tx_id: &TxId) -> bool {
        self.committed_heights.contains_key(tx_id.as_str())
    }

    fn get_block_containing_tx(&self, tx_id: &TxId) -> Vec<u64> {
        self.committed_heights
            .get(tx_id.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn get_election_transaction(&self, tx_id: &TxId) -> Option<Election> {
        self.elections.get(tx_id.as_str()).cloned()
    }

    fn get_election(&self, id: &TxId) -> Option<ElectionResult> {
        self.results.get(id.as_str()).cloned()
    }

    fn store_election_results(&mut self, height: u64, result: ElectionResult) -> Result<()> {
        tracing::debug!(election_id = %result.election_id, height, "storing election result");
        self.results
            .insert(result.election_id.as_str().to_string(), result);
        Ok(())
    }

    fn get_asset_tokens_for_public_key(&self, asset_id: &TxId, _election_pk: &str) -> Vec<Vote> {
        self.votes.get(asset_id.as_str()).cloned().unwrap_or_default()
    }
}
