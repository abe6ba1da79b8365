use indexmap::IndexMap;

use election_core::{
    ChainView, ElectionCatalogue, ElectionConfig, ElectionResult, TxId, ValidatorUpdate, Vote,
};

use crate::error::Result;

/// Drives the per-block conclusion check (`spec.md` §4.F): groups the
/// block's vote transactions by the election they target, and for each
/// target still ongoing, checks whether this block's votes plus what was
/// already committed cross the supermajority. Concluded elections are
/// resolved in the order their first vote appears in `pending_votes`,
/// matching the source's dict-insertion-order iteration.
#[derive(Debug, Default)]
pub struct ApprovalDriver {
    config: ElectionConfig,
}

impl ApprovalDriver {
    pub fn new(config: ElectionConfig) -> Self {
        Self { config }
    }

    /// Processes one block's worth of vote transactions against `chain`,
    /// persisting a result for each election that concludes and returning
    /// the validator-set updates its effect produced, in conclusion order.
    pub fn process_block(
        &self,
        chain: &mut dyn ChainView,
        catalogue: &ElectionCatalogue,
        new_height: u64,
        pending_votes: &[Vote],
    ) -> Result<Vec<ValidatorUpdate>> {
        let mut by_election: IndexMap<TxId, Vec<Vote>> = IndexMap::new();
        for vote in pending_votes {
            by_election
                .entry(vote.asset_id.clone())
                .or_default()
                .push(vote.clone());
        }

        let mut updates = Vec::new();

        for (election_id, votes) in by_election {
            let Some(election) = chain.get_election_transaction(&election_id) else {
                tracing::debug!(%election_id, "vote targets an id that isn't an election transaction");
                continue;
            };

            if !election.has_concluded(chain, &votes, &self.config)? {
                continue;
            }

            let update = election.on_approval(catalogue, chain, new_height)?;

            chain.store_election_results(
                new_height,
                ElectionResult {
                    election_id: election_id.clone(),
                    height_concluded: new_height,
                    effect_digest: update.as_ref().map(|u| format!("{u:?}")),
                },
            )?;

            tracing::info!(%election_id, height = new_height, "election concluded");

            if let Some(update) = update {
                updates.push(update);
            }
        }

        Ok(updates)
    }
}
