//! Parameter-to-querystring normalization

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Query pairs ready to be appended to an endpoint URL
pub type QueryPairs = Vec<(String, String)>;

/// Normalize an argument map into query pairs
///
/// Entries whose value is `null` or an empty string are dropped. Booleans
/// become `"true"`/`"false"`, numbers their decimal text, and strings are
/// used as-is. Arrays of scalars are joined with commas.
pub fn normalize(params: &Map<String, Value>) -> QueryPairs {
    params
        .iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key.clone(), text)))
        .collect()
}

/// Serialize typed parameters and normalize the result
pub fn to_query<T: Serialize>(params: &T) -> Result<QueryPairs> {
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(normalize(&map)),
        Value::Null => Ok(Vec::new()),
        other => Err(format!("query parameters must serialize to an object, got {}", other).into()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
