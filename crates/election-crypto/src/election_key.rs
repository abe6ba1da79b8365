use crate::error::{CryptoError, Result};

/// Deterministically derives the election public key address that valid
/// votes are sent to: base58(hex_decode(election_id)).
///
/// Total for well-formed (hex) ids; fails with `InvalidBase58`'s sibling,
/// `InvalidHex`, if `id_hex` isn't valid hex. The election subsystem maps
/// this onto `ElectionError::InvalidElectionId`.
pub fn derive_election_pk(id_hex: &str) -> Result<String> {
    let bytes = hex::decode(id_hex).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
    Ok(bs58::encode(bytes).into_string())
}
