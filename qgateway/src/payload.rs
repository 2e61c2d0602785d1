//! Gateway JSON payload models and decoding helpers for transport implementations.
//!
//! The gateway answers in one of two shapes: the routed shape
//! `{"summary_md", "route": {"notebook", "section"}, "raw_llm"}` and, when the caller pinned a
//! destination, the flat shape `{"summary", "notebook", "section"}`. Failures come back as
//! `{"error": "..."}`.
//!
//! ```rust
//! use qgateway::decode_response;
//!
//! let response = decode_response(
//!     r#"{"summary_md":"- bullet","route":{"notebook":"Work","section":"Meetings"}}"#,
//! )
//! .expect("routed payload should decode");
//!
//! assert_eq!(response.summary, "- bullet");
//! assert_eq!(response.route.location(), Some(("Work", "Meetings")));
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::{GatewayError, GatewayResponse, NotebookSections, Route};

pub fn decode_response(body: &str) -> Result<GatewayResponse, GatewayError> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(message) = error_message_from_value(&value)
        && !has_summary(&value)
    {
        return Err(GatewayError::rejected(message));
    }

    let wire: WireResponse = serde_json::from_value(value)?;
    let route = match wire.route {
        Some(route) => route,
        None => Route::new(wire.notebook, wire.section),
    };

    Ok(GatewayResponse {
        summary: wire.summary,
        route,
        raw: wire.raw,
    })
}

pub fn decode_notebooks(body: &str) -> Result<Vec<NotebookSections>, GatewayError> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(message) = error_message_from_value(&value) {
        return Err(GatewayError::rejected(message));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    error_message_from_value(&value)
}

/// Classifies a non-success HTTP answer from the gateway.
pub fn error_from_status(status: u16, body: &str) -> GatewayError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| format!("gateway request failed with status {status}"));

    match status {
        408 | 504 => GatewayError::timeout(message),
        502 | 503 => GatewayError::network(message),
        _ => GatewayError::rejected(message),
    }
}

fn error_message_from_value(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    ["error", "detail"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn has_summary(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("summary") || object.contains_key("summary_md"))
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(alias = "summary_md")]
    summary: String,
    #[serde(default)]
    route: Option<Route>,
    #[serde(default)]
    notebook: Option<String>,
    #[serde(default)]
    section: Option<String>,
    #[serde(default, alias = "raw_llm")]
    raw: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatewayErrorKind;

    #[test]
    fn decodes_routed_shape_with_null_route_parts() {
        let response = decode_response(
            r#"{"summary_md":"Got it","route":{"notebook":null,"section":null},"raw_llm":"{}"}"#,
        )
        .expect("payload should decode");

        assert_eq!(response.summary, "Got it");
        assert_eq!(response.route, Route::unrouted());
        assert_eq!(response.raw.as_deref(), Some("{}"));
    }

    #[test]
    fn decodes_flat_override_shape() {
        let response =
            decode_response(r#"{"summary":"Filed","notebook":"Work","section":"Meetings"}"#)
                .expect("payload should decode");

        assert_eq!(response.route.location(), Some(("Work", "Meetings")));
        assert_eq!(response.raw, None);
    }

    #[test]
    fn error_envelope_decodes_to_rejected_error() {
        let err = decode_response(r#"{"error":"No input provided"}"#)
            .expect_err("error envelope should fail");

        assert_eq!(err.kind, GatewayErrorKind::Rejected);
        assert_eq!(err.message, "No input provided");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let err = decode_response("<html>bad gateway</html>").expect_err("html should fail");
        assert_eq!(err.kind, GatewayErrorKind::Decode);

        let err = decode_response(r#"{"route":{}}"#).expect_err("missing summary should fail");
        assert_eq!(err.kind, GatewayErrorKind::Decode);
    }

    #[test]
    fn status_mapping_distinguishes_timeouts_and_unreachable_gateways() {
        let timeout = error_from_status(504, "");
        assert_eq!(timeout.kind, GatewayErrorKind::Timeout);
        assert_eq!(timeout.message, "gateway request failed with status 504");

        let unavailable = error_from_status(503, r#"{"error":"maintenance"}"#);
        assert_eq!(unavailable.kind, GatewayErrorKind::Network);
        assert_eq!(unavailable.message, "maintenance");

        let rejected = error_from_status(500, r#"{"detail":"OneNote write failed"}"#);
        assert_eq!(rejected.kind, GatewayErrorKind::Rejected);
        assert_eq!(rejected.message, "OneNote write failed");
    }
}
