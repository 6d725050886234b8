//! Response decoding for service calls.
//!
//! The service does not commit to a response schema, so a successful call
//! yields an opaque JSON document. Typed accessors cover the fields the
//! current service emits; none of them are required to be present.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Opaque service response document.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    raw: Value,
}

impl ServiceResponse {
    /// Decode a response body received with a success status.
    ///
    /// A missing or unparsable body degrades to the empty document; a
    /// success status never fails on body content.
    pub fn from_body(body: &str) -> Self {
        let raw = serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Default::default()));
        Self { raw }
    }

    /// The empty document.
    pub fn empty() -> Self {
        Self {
            raw: Value::Object(Default::default()),
        }
    }

    /// Whether the document carries no fields.
    pub fn is_empty(&self) -> bool {
        match &self.raw {
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Look up a top-level numeric field.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Look up a top-level string field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Risk classification score (`cls`), in [0, 1] for the current model.
    pub fn score(&self) -> Option<f64> {
        self.number("cls")
    }

    /// Model confidence in the score.
    pub fn confidence(&self) -> Option<f64> {
        self.number("confidence")
    }

    /// Decision threshold the service applied.
    pub fn threshold(&self) -> Option<f64> {
        self.number("threshold")
    }

    /// Enforcement action, e.g. `allow` or `hard_lock`.
    pub fn action(&self) -> Option<&str> {
        self.text("action")
    }

    /// Human-readable rationale strings.
    pub fn reasons(&self) -> Vec<&str> {
        self.get("reasons")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Version of the policy the verdict was produced under.
    pub fn policy_version(&self) -> Option<&str> {
        self.text("policy_version")
    }

    /// Quota reset instant from a quota document.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.text("reset_at")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Borrow the underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Take ownership of the underlying JSON document.
    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl From<Value> for ServiceResponse {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_body_is_decoded_verbatim() {
        let response = ServiceResponse::from_body(r#"{"risk":0.82,"action":"block"}"#);
        assert_eq!(response.number("risk"), Some(0.82));
        assert_eq!(response.action(), Some("block"));
        assert_eq!(
            response.as_value(),
            &serde_json::json!({"risk": 0.82, "action": "block"})
        );
    }

    #[test]
    fn test_empty_body_degrades_to_empty_document() {
        let response = ServiceResponse::from_body("");
        assert!(response.is_empty());
        assert_eq!(response.as_value(), &serde_json::json!({}));
    }

    #[test]
    fn test_invalid_body_degrades_to_empty_document() {
        let response = ServiceResponse::from_body("{not json");
        assert!(response.is_empty());
        assert_eq!(response, ServiceResponse::empty());
    }

    #[test]
    fn test_verdict_accessors() {
        let response = ServiceResponse::from_body(
            r#"{
                "cls": 0.74,
                "confidence": 0.94,
                "threshold": 0.5,
                "reasons": ["High typing irregularity", "Erratic touch patterns"],
                "action": "soft_lock",
                "policy_version": "2025.08"
            }"#,
        );

        assert_eq!(response.score(), Some(0.74));
        assert_eq!(response.confidence(), Some(0.94));
        assert_eq!(response.threshold(), Some(0.5));
        assert_eq!(response.action(), Some("soft_lock"));
        assert_eq!(response.policy_version(), Some("2025.08"));
        assert_eq!(
            response.reasons(),
            vec!["High typing irregularity", "Erratic touch patterns"]
        );
    }

    #[test]
    fn test_accessors_absent_on_foreign_documents() {
        let response = ServiceResponse::from_body(r#"[1, 2, 3]"#);
        assert!(!response.is_empty());
        assert_eq!(response.score(), None);
        assert_eq!(response.action(), None);
        assert!(response.reasons().is_empty());
    }

    #[test]
    fn test_reset_at_parses_rfc3339() {
        let response = ServiceResponse::from_body(r#"{"reset_at":"2025-10-01T00:00:00Z"}"#);
        let instant = response.reset_at().unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-10-01T00:00:00+00:00");

        let response = ServiceResponse::from_body(r#"{"reset_at":"next tuesday"}"#);
        assert_eq!(response.reset_at(), None);
    }
}
