//! Response envelope handling.
//!
//! Successful responses look like `{"data": ..., "error": null}`; failures
//! carry `{"error": {"errorCode": "...", "message": "..."}}` and usually a
//! non-2xx status.

use serde_json::Value;
use siren_application::ClientError;

/// Turn a raw HTTP response into the `data` payload or a [`ClientError`].
///
/// An empty body on success yields `Value::Null` (e.g. `204 No Content`).
pub fn unwrap_envelope(status: u16, body: &str) -> Result<Value, ClientError> {
    let success = (200..300).contains(&status);

    if body.trim().is_empty() {
        return if success {
            Ok(Value::Null)
        } else {
            Err(ClientError::Api {
                status,
                message: format!("HTTP {}", status),
            })
        };
    }

    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if success => return Err(ClientError::Decode(e.to_string())),
        Err(_) => {
            return Err(ClientError::Api {
                status,
                message: body.trim().to_string(),
            });
        }
    };

    if let Some(message) = error_message(&parsed) {
        return Err(ClientError::Api { status, message });
    }
    if !success {
        return Err(ClientError::Api {
            status,
            message: format!("HTTP {}", status),
        });
    }

    Ok(match parsed {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    })
}

/// Message of a non-null `error` field, if any
fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(error) => Some(
            error
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| error.get("errorCode").and_then(Value::as_str))
                .unwrap_or("Unknown error")
                .to_string(),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_data() {
        let value = unwrap_envelope(200, r#"{"data": {"id": "t1"}, "error": null}"#).unwrap();
        assert_eq!(value, json!({"id": "t1"}));
    }

    #[test]
    fn test_body_without_envelope_passes_through() {
        let value = unwrap_envelope(200, r#"{"status": "ok"}"#).unwrap();
        assert_eq!(value, json!({"status": "ok"}));
    }

    #[test]
    fn test_error_object_becomes_api_error() {
        let err = unwrap_envelope(
            400,
            r#"{"data": null, "error": {"errorCode": "BAD_REQUEST", "message": "name is required"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: "name is required".to_string()
            }
        );
    }

    #[test]
    fn test_error_with_success_status_is_still_an_error() {
        let err = unwrap_envelope(200, r#"{"error": {"errorCode": "NOT_FOUND"}}"#).unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 200,
                message: "NOT_FOUND".to_string()
            }
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(unwrap_envelope(204, "").unwrap(), Value::Null);
        assert!(matches!(
            unwrap_envelope(502, ""),
            Err(ClientError::Api { status: 502, .. })
        ));
    }

    #[test]
    fn test_non_json_bodies() {
        assert!(matches!(
            unwrap_envelope(200, "<html>"),
            Err(ClientError::Decode(_))
        ));
        assert_eq!(
            unwrap_envelope(503, "Service Unavailable").unwrap_err(),
            ClientError::Api {
                status: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }
}
