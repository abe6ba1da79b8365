use crate::chain::ChainView;
use crate::election::Election;
use crate::error::Result;

/// `spec.md` §4.E: derived on demand from persisted results and
/// validator-change history, never stored directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionStatus {
    Ongoing,
    Concluded,
    Inconclusive,
}

/// True iff the validator set has changed strictly after `election`'s
/// inclusion height. A fresh chain with no recorded change, or an
/// election that hasn't been included in a block yet, is treated as
/// unchanged — the latter path matters for pre-inclusion admission
/// checks and is not expected to be reachable once an election is
/// already committed.
pub fn has_validator_set_changed(election: &Election, chain: &dyn ChainView) -> Result<bool> {
    let latest = match chain
        .latest_height()
        .and_then(|height| chain.get_validator_change(height))
    {
        Some(change) => change,
        None => return Ok(false),
    };

    let election_height = match chain.get_block_containing_tx(&election.id).first() {
        Some(height) => *height,
        None => {
            tracing::debug!(election_id = %election.id, "election not yet included in a block");
            return Ok(false);
        }
    };

    Ok(latest.height > election_height)
}

pub fn get_status(election: &Election, chain: &dyn ChainView) -> Result<ElectionStatus> {
    if chain.get_election(&election.id).is_some() {
        return Ok(ElectionStatus::Concluded);
    }

    if has_validator_set_changed(election, chain)? {
        Ok(ElectionStatus::Inconclusive)
    } else {
        Ok(ElectionStatus::Ongoing)
    }
}
