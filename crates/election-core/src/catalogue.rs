use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::chain::{ChainView, ValidatorUpdate};
use crate::election::Election;
use crate::error::{ElectionError, Result};
use election_crypto::PublicKey;

/// The capability interface concrete election subtypes implement,
/// standing in for the source's class inheritance (`spec.md` §9): a
/// custom schema check and the on-approval effect. `operation` is the
/// tag the base transaction layer dispatches on before a transaction
/// ever reaches this subsystem.
pub trait ElectionEffect: fmt::Debug + Send + Sync {
    fn operation(&self) -> &'static str;

    fn custom_schema(&self, asset_data: &Value) -> Result<()>;

    fn on_approval(
        &self,
        chain: &dyn ChainView,
        new_height: u64,
        election: &Election,
    ) -> Result<Option<ValidatorUpdate>>;
}

/// A static registry mapping operation tags to subtypes (`spec.md`
/// §4.H). Lookup is exhaustive over what's registered; an operation tag
/// with nothing registered for it surfaces as `ElectionError::NotImplemented`
/// when the driver tries to invoke `on_approval`.
#[derive(Default)]
pub struct ElectionCatalogue {
    effects: HashMap<&'static str, Box<dyn ElectionEffect>>,
}

impl fmt::Debug for ElectionCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElectionCatalogue")
            .field("operations", &self.effects.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ElectionCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalogue populated with the two governance actions this
    /// crate ships: validator-set rotation and chain migration markers.
    pub fn with_builtins() -> Self {
        let mut catalogue = Self::new();
        catalogue.register(Box::new(ValidatorSetUpdateElection));
        catalogue.register(Box::new(ChainMigrationElection));
        catalogue
    }

    pub fn register(&mut self, effect: Box<dyn ElectionEffect>) {
        self.effects.insert(effect.operation(), effect);
    }

    pub fn get(&self, operation: &str) -> Option<&dyn ElectionEffect> {
        self.effects.get(operation).map(|effect| effect.as_ref())
    }
}

pub const VALIDATOR_SET_UPDATE_ELECTION: &str = "VALIDATOR_SET_UPDATE_ELECTION";
pub const CHAIN_MIGRATION_ELECTION: &str = "CHAIN_MIGRATION_ELECTION";

fn schema_err(path: impl Into<String>, reason: impl Into<String>) -> ElectionError {
    ElectionError::InvalidSchema {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Proposes a new validator set; on approval the driver hands the decoded
/// set back to whatever drives the consensus engine.
#[derive(Debug, Default)]
pub struct ValidatorSetUpdateElection;

impl ElectionEffect for ValidatorSetUpdateElection {
    fn operation(&self) -> &'static str {
        VALIDATOR_SET_UPDATE_ELECTION
    }

    fn custom_schema(&self, asset_data: &Value) -> Result<()> {
        let validators = asset_data
            .get("validators")
            .and_then(Value::as_array)
            .ok_or_else(|| schema_err("asset.data.validators", "must be a non-null array"))?;
        if validators.is_empty() {
            return Err(schema_err("asset.data.validators", "must not be empty"));
        }
        for (i, entry) in validators.iter().enumerate() {
            if entry.get("public_key").and_then(Value::as_str).is_none() {
                return Err(schema_err(
                    format!("asset.data.validators[{i}].public_key"),
                    "must be a base58 string",
                ));
            }
            if entry.get("power").and_then(Value::as_u64).is_none() {
                return Err(schema_err(
                    format!("asset.data.validators[{i}].power"),
                    "must be a non-negative integer",
                ));
            }
        }
        Ok(())
    }

    fn on_approval(
        &self,
        _chain: &dyn ChainView,
        new_height: u64,
        election: &Election,
    ) -> Result<Option<ValidatorUpdate>> {
        let validators = election
            .asset_data
            .get("validators")
            .and_then(Value::as_array)
            .ok_or_else(|| schema_err("asset.data.validators", "missing at approval time"))?;

        let mut update = Vec::with_capacity(validators.len());
        for entry in validators {
            let pk_str = entry
                .get("public_key")
                .and_then(Value::as_str)
                .ok_or_else(|| schema_err("asset.data.validators[].public_key", "missing"))?;
            let power = entry
                .get("power")
                .and_then(Value::as_u64)
                .ok_or_else(|| schema_err("asset.data.validators[].power", "missing"))?;
            update.push((PublicKey::from_base58(pk_str)?, power));
        }

        tracing::info!(
            election_id = %election.id,
            height = new_height,
            validator_count = update.len(),
            "validator set update approved"
        );

        Ok(Some(ValidatorUpdate { validators: update }))
    }
}

/// Marks a chain migration/upgrade. Carries no validator-set effect of
/// its own; exists to demonstrate that not every election subtype
/// produces a `ValidatorUpdate`.
#[derive(Debug, Default)]
pub struct ChainMigrationElection;

impl ElectionEffect for ChainMigrationElection {
    fn operation(&self) -> &'static str {
        CHAIN_MIGRATION_ELECTION
    }

    fn custom_schema(&self, asset_data: &Value) -> Result<()> {
        if asset_data.get("upgrade").and_then(Value::as_str).is_none() {
            return Err(schema_err("asset.data.upgrade", "must be a string marker"));
        }
        Ok(())
    }

    fn on_approval(
        &self,
        _chain: &dyn ChainView,
        new_height: u64,
        election: &Election,
    ) -> Result<Option<ValidatorUpdate>> {
        let upgrade = election
            .asset_data
            .get("upgrade")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>");
        tracing::info!(
            election_id = %election.id,
            height = new_height,
            upgrade,
            "chain migration approved"
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let catalogue = ElectionCatalogue::with_builtins();
        assert!(catalogue.get(VALIDATOR_SET_UPDATE_ELECTION).is_some());
        assert!(catalogue.get(CHAIN_MIGRATION_ELECTION).is_some());
        assert!(catalogue.get("UNKNOWN").is_none());
    }

    #[test]
    fn validator_set_update_rejects_malformed_data() {
        let effect = ValidatorSetUpdateElection;
        assert!(effect.custom_schema(&serde_json::json!({})).is_err());
        assert!(effect
            .custom_schema(&serde_json::json!({"validators": []}))
            .is_err());
        assert!(effect
            .custom_schema(&serde_json::json!({"validators": [{"public_key": "abc"}]}))
            .is_err());
    }

    #[test]
    fn chain_migration_requires_upgrade_marker() {
        let effect = ChainMigrationElection;
        assert!(effect.custom_schema(&serde_json::json!({})).is_err());
        assert!(effect
            .custom_schema(&serde_json::json!({"upgrade": "v2"}))
            .is_ok());
    }
}
