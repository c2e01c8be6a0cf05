// Response envelope normalization
//
// The backend answers either `{ "success": bool, "data": ..., "message": ... }`
// or a bare payload. Everything is folded into `Result<Value, ApiError>` here so
// no caller ever looks at the envelope.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, GENERIC_FAILURE};

/// Turn a raw HTTP status + body into the normalized payload.
pub fn normalize(status: u16, body: &str) -> Result<Value, ApiError> {
    let parsed = if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(body)
    };

    if !(200..300).contains(&status) {
        let message = parsed.ok().as_ref().and_then(extract_message);
        return Err(ApiError::from_status(status, message));
    }

    let value = parsed.map_err(|e| {
        tracing::warn!("malformed response body: {}", e);
        ApiError::MalformedBody(GENERIC_FAILURE.to_string())
    })?;

    unwrap_envelope(value)
}

fn unwrap_envelope(value: Value) -> Result<Value, ApiError> {
    let Value::Object(mut obj) = value else {
        return Ok(value);
    };

    match obj.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(obj.remove("data").unwrap_or(Value::Null)),
        Some(false) => Err(ApiError::Rejected(
            message_from(&obj).unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        )),
        None => Ok(Value::Object(obj)),
    }
}

/// Pull a displayable message out of an error body
pub fn extract_message(value: &Value) -> Option<String> {
    value.as_object().and_then(message_from)
}

fn message_from(obj: &Map<String, Value>) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Read a normalized payload as a collection.
///
/// Accepts a bare array, or an object holding the array under some key.
/// Within an object the key named after `collection` (the last segment of
/// the list path, `/api/contact` -> `contacts`) wins, then `data`, `items`
/// or `results`, then the only array-valued field. Anything else is
/// ambiguous and rejected.
pub fn into_items<T: DeserializeOwned>(payload: Value, collection: &str) -> Result<Vec<T>, ApiError> {
    let array = match payload {
        Value::Array(items) => items,
        Value::Object(obj) => pick_collection(obj, collection)
            .ok_or_else(|| ApiError::MalformedBody(GENERIC_FAILURE.to_string()))?,
        _ => return Err(ApiError::MalformedBody(GENERIC_FAILURE.to_string())),
    };

    serde_json::from_value(Value::Array(array)).map_err(|e| {
        tracing::warn!("collection did not match expected record shape: {}", e);
        ApiError::MalformedBody(GENERIC_FAILURE.to_string())
    })
}

fn pick_collection(mut obj: Map<String, Value>, collection: &str) -> Option<Vec<Value>> {
    let wanted = collection_stem(collection.rsplit('/').find(|s| !s.is_empty()).unwrap_or(collection));
    let arrays: Vec<String> = obj
        .iter()
        .filter(|(_, v)| v.is_array())
        .map(|(k, _)| k.clone())
        .collect();

    let key = arrays
        .iter()
        .find(|k| !wanted.is_empty() && collection_stem(k) == wanted)
        .or_else(|| {
            ["data", "items", "results"]
                .iter()
                .find_map(|name| arrays.iter().find(|k| k.as_str() == *name))
        })
        .or_else(|| match arrays.as_slice() {
            [only] => Some(only),
            _ => None,
        })
        .cloned();

    let Some(key) = key else {
        tracing::warn!("no collection array among fields {:?}", arrays);
        return None;
    };
    match obj.remove(&key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// `doubt-solving`, `doubtSolving` and `doubt_solvings` all share one stem
fn collection_stem(name: &str) -> String {
    let flat: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    flat.strip_suffix('s').map(str::to_string).unwrap_or(flat)
}
