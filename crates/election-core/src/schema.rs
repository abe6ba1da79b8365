use crate::error::{ElectionError, Result};

/// Composed schema validation (`spec.md` §6): common transaction schema,
/// then create-transaction schema, then the subtype's custom schema. The
/// wire format these would validate against (JSON Schema, in the source)
/// is itself out of scope, so these are plain structural predicates over
/// the already-parsed entity rather than a schema document.

/// Every election transaction must declare a non-empty operation tag.
pub fn validate_common(operation: &str) -> Result<()> {
    if operation.trim().is_empty() {
        return Err(ElectionError::InvalidSchema {
            path: "operation".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

/// A create-style transaction must have exactly the inputs/outputs
/// `Election::generate` just built: one input, at least one output.
pub fn validate_create(inputs_len: usize, outputs_len: usize) -> Result<()> {
    if inputs_len == 0 {
        return Err(ElectionError::InvalidSchema {
            path: "inputs".into(),
            reason: "create transaction must have at least one input".into(),
        });
    }
    if outputs_len == 0 {
        return Err(ElectionError::InvalidSchema {
            path: "outputs".into(),
            reason: "create transaction must have at least one output".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_operation() {
        assert!(validate_common("").is_err());
        assert!(validate_common("  ").is_err());
        assert!(validate_common("ELECTION").is_ok());
    }

    #[test]
    fn rejects_empty_outputs() {
        assert!(validate_create(1, 0).is_err());
        assert!(validate_create(1, 1).is_ok());
    }
}
