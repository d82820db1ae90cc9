//! Dataset codec
//!
//! Encoding and decoding of the whole dataset.
//!
//! ## Format
//! ```text
//! {
//!   "users": { "<email>": { "createdAt", "email", "password", "name", "age" } },
//!   "posts": { "<id>":    { "id", "createdAt", "userEmail", "text" } }
//! }
//! ```
//! Keys are written in sorted order, so the same dataset always encodes to
//! the same bytes.

use serde_json::Value;

use crate::error::{ChirpError, Result};
use crate::model::Dataset;

/// Encode a dataset to compact JSON
pub fn encode(dataset: &Dataset) -> Result<Vec<u8>> {
    serde_json::to_vec(dataset).map_err(|e| ChirpError::Serialization(e.to_string()))
}

/// Encode a dataset to indented JSON (for dumps)
pub fn encode_pretty(dataset: &Dataset) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(dataset).map_err(|e| ChirpError::Serialization(e.to_string()))
}

/// Decode a dataset
///
/// Missing or `null` collections come back as empty maps. Anything that
/// is not a JSON object of the expected shape is `CorruptData`.
pub fn decode(bytes: &[u8]) -> Result<Dataset> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ChirpError::CorruptData(e.to_string()))?;

    // serde would also accept a positional array for a struct
    if !value.is_object() {
        return Err(ChirpError::CorruptData(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| ChirpError::CorruptData(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
