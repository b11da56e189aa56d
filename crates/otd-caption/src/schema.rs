//! Validation of model output against the caption schema.
//!
//! Two schemas describe the same shape. [`response_schema`] is the
//! OpenAPI-subset sent to the model to constrain generation; the JSON Schema
//! derived from `Vec<CaptionResult>` with `schemars` is what we check the
//! returned text against before deserializing.

use otd_core::entities::CaptionResult;
use schemars::schema_for;
use serde_json::{Value, json};

use crate::error::CaptionError;

/// Compiled JSON Schema for a caption batch.
pub struct CaptionSchema {
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for CaptionSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionSchema").finish_non_exhaustive()
    }
}

impl CaptionSchema {
    /// Compile the schema of `Vec<CaptionResult>`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::Schema`] if the generated schema does not compile.
    pub fn new() -> Result<Self, CaptionError> {
        let schema = serde_json::to_value(schema_for!(Vec<CaptionResult>))
            .map_err(|e| CaptionError::Schema(e.to_string()))?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| CaptionError::Schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Validate `instance` against the batch schema.
    ///
    /// # Errors
    ///
    /// Returns [`CaptionError::SchemaViolation`] listing every violation.
    pub fn validate(&self, instance: &Value) -> Result<(), CaptionError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CaptionError::SchemaViolation { errors })
        }
    }

    /// Parse model text, validate it, then deserialize.
    ///
    /// # Errors
    ///
    /// [`CaptionError::Parse`] for malformed JSON and
    /// [`CaptionError::SchemaViolation`] for a shape mismatch.
    pub fn parse_captions(&self, text: &str) -> Result<Vec<CaptionResult>, CaptionError> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| CaptionError::Parse(format!("caption output is not JSON: {e}")))?;
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| CaptionError::Parse(e.to_string()))
    }
}

/// Generation-side schema: an array of `{date, headline, matchInfo}` objects,
/// all required strings.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": { "type": "STRING" },
                "headline": { "type": "STRING" },
                "matchInfo": {
                    "type": "STRING",
                    "description": "Wedstrijd en uitslag, of een lege string."
                }
            },
            "required": ["date", "headline", "matchInfo"]
        }
    })
}
