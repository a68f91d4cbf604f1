//! Best-effort decoding of model output.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::LlmError;

/// Estimated effect of an intervention strategy on a node's gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub reduction: f64,
    pub reasoning: String,
}

/// Strip markdown code fences (```json ... ```) from a response.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with("```") {
        let after_open = match text.find('\n') {
            Some(nl) => &text[nl + 1..],
            None => return text,
        };
        if let Some(close) = after_open.rfind("```") {
            return after_open[..close].trim();
        }
        return after_open.trim();
    }
    text
}

/// JSON Schema the decoded simulation object must satisfy. Built once; a
/// compile failure is kept and reported on every parse.
fn simulation_validator() -> &'static Result<jsonschema::Validator, String> {
    static VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        let schema = json!({
            "type": "object",
            "properties": {
                "reduction": { "type": "number" },
                "reasoning": { "type": "string" }
            },
            "required": ["reduction", "reasoning"]
        });
        jsonschema::validator_for(&schema).map_err(|e| e.to_string())
    })
}

/// Decode a simulation answer. Fenced JSON is accepted; anything that does
/// not match `{reduction: number, reasoning: string}` is a parse error.
pub fn parse_simulation(text: &str) -> Result<SimulationResult, LlmError> {
    let body = strip_code_fences(text);
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LlmError::Parse(format!("simulation answer is not JSON: {}", e)))?;

    let validator = simulation_validator()
        .as_ref()
        .map_err(|e| LlmError::Parse(format!("simulation schema is invalid: {}", e)))?;
    let errors: Vec<String> = validator
        .iter_errors(&value)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(LlmError::Parse(format!(
            "simulation answer does not match schema: {}",
            errors.join("; ")
        )));
    }

    serde_json::from_value(value).map_err(|e| LlmError::Parse(e.to_string()))
}
