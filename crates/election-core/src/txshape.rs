use std::collections::BTreeMap;
use std::fmt;

use election_crypto::{sha256_hex, verify_signature, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// A transaction id: lowercase hex SHA-256 of the canonical serialization
/// of the transaction's content. The base transaction model this is
/// inherited from is out of scope (`spec.md` §1); this is the minimal
/// concretization the election logic needs to type-check and hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxId(String);

impl TxId {
    pub fn from_hex(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single input: the signers who must authorize spending whatever this
/// input references, and their signatures over the transaction id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    pub owners_before: Vec<PublicKey>,
    pub signatures: Vec<Signature>,
}

impl Input {
    pub fn unsigned(owner: PublicKey) -> Self {
        Self {
            owners_before: vec![owner],
            signatures: Vec::new(),
        }
    }
}

/// A single output: who receives it and how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Recipient addresses, base58-encoded. Usually a single real
    /// validator address; for a valid vote output it must be exactly
    /// `[derive_election_pk(election_id)]`, which is not itself a curve
    /// point, so this is modeled as an opaque string rather than the
    /// strict ed25519 `PublicKey` type.
    pub public_keys: Vec<String>,
    pub amount: u64,
}

impl Output {
    pub fn to_validator(public_key: &PublicKey, amount: u64) -> Self {
        Self {
            public_keys: vec![public_key.to_base58()],
            amount,
        }
    }

    pub fn single_public_key(&self) -> Option<&str> {
        match self.public_keys.as_slice() {
            [one] => Some(one.as_str()),
            _ => None,
        }
    }
}

/// Stands in for the base transaction model's signature-verification
/// primitives (`spec.md` §1: out of scope). Concrete election/vote
/// validation depends on this trait rather than a hardcoded algorithm so
/// the real base model can supply its own `inputs_valid` semantics.
pub trait SignatureVerifier {
    fn inputs_valid(&self, message: &[u8], inputs: &[Input]) -> bool;
}

/// Default verifier: every declared signer must have produced a valid
/// ed25519 signature over `message`, with signer and signature counts
/// matching 1:1.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn inputs_valid(&self, message: &[u8], inputs: &[Input]) -> bool {
        inputs.iter().all(|input| {
            input.owners_before.len() == input.signatures.len()
                && input
                    .owners_before
                    .iter()
                    .zip(&input.signatures)
                    .all(|(pk, sig)| verify_signature(message, sig, pk))
        })
    }
}

/// Hash the canonical (sorted-key) JSON form of `value` to produce a
/// transaction id. Sorting keys recursively makes the hash independent
/// of field insertion order, the way a real canonical encoder would.
pub fn compute_id(value: &serde_json::Value) -> TxId {
    TxId::from_hex(sha256_hex(&canonical_bytes(value)))
}

fn canonical_bytes(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&sort_keys(value)).unwrap_or_default()
}

fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let sorted: BTreeMap<String, serde_json::Value> =
                map.iter().map(|(k, v)| (k.clone(), sort_keys(v))).collect();
            serde_json::to_value(sorted).unwrap_or(serde_json::Value::Null)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_id_ignores_key_order() {
        let a = serde_json::json!({"b": 1, "a": 2});
        let b = serde_json::json!({"a": 2, "b": 1});
        assert_eq!(compute_id(&a), compute_id(&b));
    }

    #[test]
    fn canonical_id_is_deterministic() {
        let v = serde_json::json!({"operation": "ELECTION", "seed": "x"});
        assert_eq!(compute_id(&v), compute_id(&v));
    }

    #[test]
    fn single_public_key_rejects_multi() {
        let out = Output {
            public_keys: vec!["a".into(), "b".into()],
            amount: 5,
        };
        assert_eq!(out.single_public_key(), None);
    }
}
