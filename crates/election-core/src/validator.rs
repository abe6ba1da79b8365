use election_crypto::PublicKey;
use indexmap::IndexMap;

/// Snapshot of the validator set at a height: ed25519 public key ->
/// voting power. Backed by `IndexMap` (not `HashMap`) so iteration order
/// is deterministic — `election-driver`'s approval ordering and any
/// hashing over the set depend on that, per `spec.md` §9's note against
/// module-level caches and for determinism across forks.
pub type ValidatorSet = IndexMap<PublicKey, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    pub public_key: PublicKey,
    pub voting_power: u64,
}

/// A consensus-engine-reported update to the validator set, recorded
/// whenever the reported set differs from the previous committed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorChange {
    pub height: u64,
    pub validators: ValidatorSet,
}

pub fn total_voting_power(validators: &ValidatorSet) -> u64 {
    validators.values().sum()
}

/// The base58 address each validator's voting power is addressed to in
/// election outputs — the wire identity, as distinct from the strict
/// ed25519 `PublicKey` used for signature verification.
pub fn addresses(validators: &ValidatorSet) -> IndexMap<String, u64> {
    validators
        .iter()
        .map(|(pk, power)| (pk.to_base58(), *power))
        .collect()
}

/// Convert a validator set into the `(public_key, voting_power)`
/// recipient list `Election::generate` needs, in validator-set order.
/// Named after the source's `Election.recipients` classmethod.
pub fn recipients(validators: &ValidatorSet) -> Vec<(PublicKey, u64)> {
    validators.iter().map(|(pk, power)| (*pk, *power)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> PublicKey {
        let sk = ed25519_dalek::SigningKey::from_bytes(&[byte; 32]);
        PublicKey::from_bytes(sk.verifying_key().to_bytes()).unwrap()
    }

    #[test]
    fn sums_voting_power() {
        let mut set = ValidatorSet::new();
        set.insert(pk(1), 5);
        set.insert(pk(2), 5);
        set.insert(pk(3), 5);
        assert_eq!(total_voting_power(&set), 15);
    }

    #[test]
    fn addresses_are_base58() {
        let mut set = ValidatorSet::new();
        let a = pk(1);
        set.insert(a, 5);
        let addrs = addresses(&set);
        assert_eq!(addrs.get(&a.to_base58()), Some(&5));
    }
}
