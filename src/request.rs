//! Request body construction.
//!
//! Builds the two-field wire body sent to the detection service. The
//! builder is a pure transformation: features pass through unmodified and
//! nothing here can fail.

use crate::context::Context;
use crate::payload::FeaturePayload;
use serde::Serialize;

/// Logical service operation. Both follow the same protocol and differ
/// only in the endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Risk assessment for a payload.
    Detect,
    /// Policy/enforcement verdict for a payload.
    Enforce,
}

impl Operation {
    /// Path appended to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Detect => "/v1/detect",
            Operation::Enforce => "/v1/enforce",
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Detect => "detect",
            Operation::Enforce => "enforce",
        }
    }
}

/// Wire request body: exactly `payload` and `context` at the top level.
#[derive(Debug, Clone, Serialize)]
pub struct RiskRequest<'a> {
    pub payload: &'a FeaturePayload,
    pub context: &'a Context,
}

/// Assemble the request body for a payload and its context.
pub fn build_request<'a>(payload: &'a FeaturePayload, context: &'a Context) -> RiskRequest<'a> {
    RiskRequest { payload, context }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Platform;

    #[test]
    fn test_body_has_exactly_two_fields() {
        let payload = FeaturePayload::new().with("iki_mean", 180.0);
        let context = Context::new(Platform::Web);
        let body = serde_json::to_value(build_request(&payload, &context)).unwrap();

        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("payload"));
        assert!(object.contains_key("context"));
    }

    #[test]
    fn test_features_pass_through_unmodified() {
        let payload = FeaturePayload::new()
            .with("iki_mean", 180.0)
            .with("typos_per_100", 9.0);
        let context = Context::new(Platform::Web);

        let body = serde_json::to_value(build_request(&payload, &context)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "payload": {"iki_mean": 180.0, "typos_per_100": 9.0},
                "context": {"platform": "web"}
            })
        );
    }

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::Detect.path(), "/v1/detect");
        assert_eq!(Operation::Enforce.path(), "/v1/enforce");
        assert_eq!(Operation::Detect.name(), "detect");
        assert_eq!(Operation::Enforce.name(), "enforce");
    }
}
