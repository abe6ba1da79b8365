use std::fmt;

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CryptoError, Result};
use crate::pubkey::PublicKey;

/// An ed25519 signature over a transaction id.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(DalekSignature);

impl Signature {
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Self(DalekSignature::from_bytes(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignature("expected 64 bytes".into()))?;
        Ok(Self::from_bytes(&arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Sign `message` (the transaction id bytes) with a raw ed25519 signing key.
/// Exposed mainly for tests that need to construct well-signed fixtures.
pub fn sign_message(message: &[u8], signing_key: &SigningKey) -> Signature {
    Signature(signing_key.sign(message))
}

/// Verify that `signature` over `message` was produced by `public_key`.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    public_key
        .verifying_key()
        .verify(message, &signature.0)
        .is_ok()
}
