//! Compiled parameter schemas
//!
//! Each tool compiles its JSON Schema once; calls validate against the
//! compiled form.

use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{GatewayError, Result};

/// A JSON Schema together with its compiled validator
#[derive(Clone)]
pub struct ParamSchema {
    raw: Value,
    validator: Arc<Validator>,
}

impl ParamSchema {
    /// Compile `raw`; `owner` names the tool in the error
    pub fn compile(owner: &str, raw: Value) -> Result<Self> {
        let validator = jsonschema::validator_for(&raw).map_err(|e| GatewayError::InvalidSchema {
            name: owner.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw,
            validator: Arc::new(validator),
        })
    }

    /// Check `params`, collecting one message per violation
    pub fn validate(&self, params: &Value) -> std::result::Result<(), Vec<String>> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(params)
            .map(|e| {
                let pointer = e.instance_path.to_string();
                if pointer.is_empty() {
                    e.to_string()
                } else {
                    format!("{}: {}", pointer, e)
                }
            })
            .collect();
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// True when the schema describes a JSON object
    pub fn is_object(&self) -> bool {
        self.raw.get("type").and_then(Value::as_str) == Some("object")
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl std::fmt::Debug for ParamSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ParamSchema").field(&self.raw).finish()
    }
}
