//! Platform context attached to every request.
//!
//! Context tells the service where a payload came from. `platform` is
//! always present; any extra descriptive fields are flattened beside it
//! in the wire document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform identifier reported to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Web,
    Desktop,
}

impl Platform {
    /// Wire representation of the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
            Platform::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            "web" => Ok(Platform::Web),
            "desktop" => Ok(Platform::Desktop),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// Request context: platform plus optional descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Originating platform.
    pub platform: Platform,
    /// Extra descriptive fields, serialized beside `platform`.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Context {
    /// Create a context carrying only the platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            fields: BTreeMap::new(),
        }
    }

    /// Attach an extra descriptive field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Generate a device fingerprint for callers that opt in to device
/// tagging: hostname plus a short random suffix.
pub fn device_fingerprint() -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    format!("{}-{}", host, &uuid::Uuid::new_v4().to_string()[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip() {
        for platform in [
            Platform::Android,
            Platform::Ios,
            Platform::Web,
            Platform::Desktop,
        ] {
            let parsed: Platform = platform.as_str().parse().unwrap();
            assert_eq!(parsed, platform);
        }

        assert!("amiga".parse::<Platform>().is_err());
    }

    #[test]
    fn test_bare_context_serializes_platform_only() {
        let json = serde_json::to_value(Context::new(Platform::Web)).unwrap();
        assert_eq!(json, serde_json::json!({"platform": "web"}));
    }

    #[test]
    fn test_extra_fields_flatten_beside_platform() {
        let context = Context::new(Platform::Android)
            .with_field("app_version", "3.2.1")
            .with_field("locale", "en-GB");

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "platform": "android",
                "app_version": "3.2.1",
                "locale": "en-GB"
            })
        );
    }

    #[test]
    fn test_device_fingerprint_has_suffix() {
        let fingerprint = device_fingerprint();
        let suffix = fingerprint.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
    }
}
