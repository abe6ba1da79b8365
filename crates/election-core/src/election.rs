use serde_json::Value;
use uuid::Uuid;

use crate::catalogue::ElectionCatalogue;
use crate::chain::ChainView;
use crate::config::ElectionConfig;
use crate::error::{ElectionError, Result};
use crate::status::{get_status, ElectionStatus};
use crate::tally::{committed_votes, count_votes};
use crate::txshape::{compute_id, Input, Output, SignatureVerifier, TxId};
use crate::validator::{addresses, recipients, total_voting_power, ValidatorSet};
use crate::vote::Vote;
use election_crypto::{derive_election_pk as derive_pk, PublicKey};

/// A create-style transaction that distributes voting tokens over a
/// validator set and, once a supermajority of that power votes it
/// through, triggers a governance effect (`spec.md` §4.A/§4.H).
#[derive(Debug, Clone)]
pub struct Election {
    pub id: TxId,
    pub operation: String,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub asset_data: Value,
    pub metadata: Option<Value>,
}

impl Election {
    /// Builds a new, unsigned election proposal. One output per entry in
    /// `voters`, in validator-set order, each carrying that validator's
    /// voting power as the token amount. `seed` breaks ties between two
    /// elections that would otherwise hash identically (`spec.md` §4.B).
    pub fn generate(
        proposer: PublicKey,
        voters: &ValidatorSet,
        operation: impl Into<String>,
        asset_data: Value,
        metadata: Option<Value>,
        catalogue: &ElectionCatalogue,
    ) -> Result<Self> {
        let operation = operation.into();
        let effect = catalogue
            .get(&operation)
            .ok_or_else(|| ElectionError::NotImplemented(operation.clone()))?;
        effect.custom_schema(&asset_data)?;

        let outputs: Vec<Output> = recipients(voters)
            .into_iter()
            .map(|(pk, power)| Output::to_validator(&pk, power))
            .collect();
        crate::schema::validate_create(1, outputs.len())?;

        let seed = Uuid::new_v4().to_string();
        let id = compute_id(&serde_json::json!({
            "operation": operation,
            "proposer": proposer.to_hex(),
            "outputs": outputs,
            "asset_data": asset_data,
            "metadata": metadata,
            "seed": seed,
        }));

        Ok(Self {
            id,
            operation,
            inputs: vec![Input::unsigned(proposer)],
            outputs,
            asset_data,
            metadata,
        })
    }

    /// Full admission check (`spec.md` §4.C): schema, proposer membership,
    /// outgoing topology, signature, and non-duplication. `pending`
    /// carries election ids already admitted earlier in the same block,
    /// since the chain itself won't know about those yet.
    pub fn validate(
        self,
        chain: &dyn ChainView,
        pending: &[TxId],
        verifier: &dyn SignatureVerifier,
        catalogue: &ElectionCatalogue,
    ) -> Result<Self> {
        crate::schema::validate_common(&self.operation)?;
        crate::schema::validate_create(self.inputs.len(), self.outputs.len())?;
        let effect = catalogue
            .get(&self.operation)
            .ok_or_else(|| ElectionError::NotImplemented(self.operation.clone()))?;
        effect.custom_schema(&self.asset_data)?;

        if self.inputs.len() != 1 || self.inputs[0].owners_before.len() != 1 {
            return Err(ElectionError::MultipleInputsError);
        }

        if chain.is_committed(&self.id) || pending.contains(&self.id) {
            return Err(ElectionError::DuplicateTransaction(self.id.to_string()));
        }

        let validators = chain.get_validators(None);
        let proposer = self.inputs[0].owners_before[0];
        if !validators.contains_key(&proposer) {
            return Err(ElectionError::InvalidProposer);
        }

        if !Self::is_same_topology(&validators, &self.outputs) {
            return Err(ElectionError::UnequalValidatorSet);
        }

        let message = self.id.as_str().as_bytes();
        if !verifier.inputs_valid(message, &self.inputs) {
            return Err(ElectionError::InvalidSignature);
        }

        Ok(self)
    }

    /// True iff `outputs` addresses exactly `current`'s validators, each
    /// with its exact voting power, and nothing else. Outputs are folded
    /// in order first — an election with two outputs to the same
    /// validator collapses to the later one before comparison, mirroring
    /// how the source builds this map by plain dict assignment.
    pub fn is_same_topology(current: &ValidatorSet, outputs: &[Output]) -> bool {
        use indexmap::IndexMap;
        let mut by_address: IndexMap<String, u64> = IndexMap::new();
        for output in outputs {
            let Some(address) = output.single_public_key() else {
                return false;
            };
            by_address.insert(address.to_string(), output.amount);
        }
        by_address == addresses(current)
    }

    /// The base58 address votes for this election must be sent to.
    pub fn derive_election_pk(&self) -> Result<String> {
        derive_pk(self.id.as_str())
            .map_err(|_| ElectionError::InvalidElectionId(self.id.to_string()))
    }

    /// True exactly once: the moment committed votes plus `pending_votes`
    /// (not-yet-committed votes from the same block) first cross the
    /// supermajority of voting power, and only if the validator set hasn't
    /// changed since this election was accepted. Once the set changes, or
    /// once conclusion was already recorded for a prior height, this
    /// returns `false` unconditionally — callers don't need to track
    /// "already concluded" themselves (`spec.md` §4.F, §9).
    pub fn has_concluded(
        &self,
        chain: &dyn ChainView,
        pending_votes: &[Vote],
        config: &ElectionConfig,
    ) -> Result<bool> {
        if self.get_status(chain)? != ElectionStatus::Ongoing {
            return Ok(false);
        }

        let election_pk = self.derive_election_pk()?;
        let validators = chain.get_validators(None);
        let total = total_voting_power(&validators);

        let committed = committed_votes(chain, &self.id, &election_pk);
        let pending = count_votes(&election_pk, pending_votes);
        let votes = committed + pending;

        Ok(config.below_threshold(committed, total) && config.at_or_above_threshold(votes, total))
    }

    pub fn get_status(&self, chain: &dyn ChainView) -> Result<ElectionStatus> {
        get_status(self, chain)
    }

    /// Dispatches to the registered subtype's effect and returns whatever
    /// validator-set change it produces, if any.
    pub fn on_approval(
        &self,
        catalogue: &ElectionCatalogue,
        chain: &dyn ChainView,
        new_height: u64,
    ) -> Result<Option<crate::chain::ValidatorUpdate>> {
        let effect = catalogue
            .get(&self.operation)
            .ok_or_else(|| ElectionError::NotImplemented(self.operation.clone()))?;
        effect.on_approval(chain, new_height, self)
    }

    /// A one-line human summary, named after the source's `show_election`.
    pub fn summarize(&self, status: ElectionStatus) -> String {
        format!(
            "election_id={} operation={} status={:?} outputs={}",
            self.id,
            self.operation,
            status,
            self.outputs.len()
        )
    }
}
