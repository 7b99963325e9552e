//! Response envelope handling
//!
//! Every body the API sends, success or failure, has the shape
//! `{"result": <payload>}`. Success bodies must carry the `result` key;
//! failure bodies are mined for a readable message.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::StatusCode;

/// Parse a success body and return its `result` payload
pub fn unwrap_envelope(endpoint: &str, body: &str) -> Result<JsonValue> {
    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::parse(endpoint, format!("invalid JSON body: {e}")))?;

    match value {
        JsonValue::Object(mut map) => map
            .remove("result")
            .ok_or_else(|| Error::parse(endpoint, "missing 'result' field in response")),
        _ => Err(Error::parse(endpoint, "missing 'result' field in response")),
    }
}

/// Best human-readable message for a failed response
///
/// Tries `result.message` (with `result.errors` details), then a top-level
/// `message`, then the raw body text, then the canonical status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<JsonValue>(body) {
        if let Some(message) = envelope_message(&value) {
            return message;
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn envelope_message(value: &JsonValue) -> Option<String> {
    if let Some(result) = value.get("result") {
        if let Some(message) = result.get("message").and_then(JsonValue::as_str) {
            return Some(match result.get("errors").and_then(describe_errors) {
                Some(details) => format!("{message} ({details})"),
                None => message.to_string(),
            });
        }
    }

    value
        .get("message")
        .and_then(JsonValue::as_str)
        .map(ToString::to_string)
}

/// Flatten the `errors` member, which is either an object or a list of them
fn describe_errors(errors: &JsonValue) -> Option<String> {
    let mut parts = Vec::new();
    collect_errors(errors, &mut parts);
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn collect_errors(value: &JsonValue, parts: &mut Vec<String>) {
    match value {
        JsonValue::Object(map) => {
            for (key, detail) in map {
                match detail {
                    JsonValue::String(s) => parts.push(format!("{key}: {s}")),
                    other => collect_errors(other, parts),
                }
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                collect_errors(item, parts);
            }
        }
        JsonValue::String(s) => parts.push(s.clone()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let result = unwrap_envelope("/FloorList", r#"{"request":{},"result":{"site":[]}}"#).unwrap();
        assert_eq!(result, json!({"site": []}));
    }

    #[test]
    fn test_unwrap_envelope_null_result_is_present() {
        let result = unwrap_envelope("/FloorList", r#"{"result":null}"#).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_unwrap_envelope_missing_result() {
        let err = unwrap_envelope("/ItemList", r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Parse { ref endpoint, .. } if endpoint == "/ItemList"));
        assert!(err.to_string().contains("missing 'result'"));
    }

    #[test]
    fn test_unwrap_envelope_invalid_json() {
        let err = unwrap_envelope("/ItemList", "<html>oops</html>").unwrap_err();
        assert!(err.to_string().contains("invalid JSON body"));
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = json!({
            "result": {
                "status": 400,
                "message": "request error",
                "errors": {"site": "site is required"}
            }
        })
        .to_string();
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, &body),
            "request error (site: site is required)"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"message":"upstream down"}"#),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, "  maintenance  "),
            "maintenance"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "500 Internal Server Error"
        );
    }
}
