use serde_json::Value;

use crate::txshape::{Input, Output, TxId};

/// The operation tag a vote transaction carries.
pub const VOTE_OPERATION: &str = "VOTE";

/// A transfer-style transaction moving a validator's election tokens to
/// the election's derived public key. Validation of the transfer shell
/// itself (signatures, input consumption) is delegated to the base
/// transaction model; this crate only inspects outputs.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: TxId,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    /// The election transaction's id — the asset this vote transfers.
    pub asset_id: TxId,
    pub metadata: Option<Value>,
}

impl Vote {
    /// An output counts toward `election_pk`'s tally iff its
    /// `public_keys` is the exact singleton `[election_pk]`. Any other
    /// shape — empty, multiple keys, or a different single key —
    /// contributes nothing, even if `election_pk` appears alongside
    /// another key.
    pub fn is_valid_vote_output(output: &Output, election_pk: &str) -> bool {
        matches!(output.single_public_key(), Some(pk) if pk == election_pk)
    }
}
