use crate::chain::ChainView;
use crate::txshape::TxId;
use crate::vote::Vote;

/// Sum, over every vote's outputs, the amount of outputs that are a
/// valid vote for `election_pk`. All other outputs contribute zero.
pub fn count_votes(election_pk: &str, votes: &[Vote]) -> u64 {
    votes
        .iter()
        .flat_map(|vote| vote.outputs.iter())
        .filter(|output| Vote::is_valid_vote_output(output, election_pk))
        .map(|output| output.amount)
        .sum()
}

/// Votes already committed to the chain for `asset_id`, addressed to
/// `election_pk`, via the chain's asset-token index.
pub fn committed_votes(chain: &dyn ChainView, asset_id: &TxId, election_pk: &str) -> u64 {
    let votes = chain.get_asset_tokens_for_public_key(asset_id, election_pk);
    count_votes(election_pk, &votes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::txshape::{Input, Output};

    fn vote(outputs: Vec<Output>) -> Vote {
        Vote {
            id: TxId::from_hex("v"),
            inputs: vec![Input { owners_before: vec![], signatures: vec![] }],
            outputs,
            asset_id: TxId::from_hex("e"),
            metadata: None,
        }
    }

    #[test]
    fn sums_across_multiple_votes() {
        let votes = vec![
            vote(vec![Output { public_keys: vec!["E".into()], amount: 5 }]),
            vote(vec![Output { public_keys: vec!["E".into()], amount: 3 }]),
        ];
        assert_eq!(count_votes("E", &votes), 8);
    }

    #[test]
    fn ignores_non_matching_outputs() {
        let votes = vec![vote(vec![
            Output { public_keys: vec!["E".into()], amount: 5 },
            Output { public_keys: vec!["X".into()], amount: 100 },
        ])];
        assert_eq!(count_votes("E", &votes), 5);
    }
}
