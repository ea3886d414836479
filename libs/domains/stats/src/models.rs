use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// One request to a tracked endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EndpointHit {
    /// Assigned by the stats server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name of the service that served the request
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "ewm-main-service")]
    pub app: String,
    #[validate(length(min = 1, max = 512))]
    #[schema(example = "/events/1")]
    pub uri: String,
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "192.163.0.1")]
    pub ip: String,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2025-03-01 12:00:00")]
    pub timestamp: DateTime<Utc>,
}

impl EndpointHit {
    pub fn new(
        app: impl Into<String>,
        uri: impl Into<String>,
        ip: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            app: app.into(),
            uri: uri.into(),
            ip: ip.into(),
            timestamp,
        }
    }

    /// Blank strings pass the length rules, so they are checked separately.
    pub fn has_blank_field(&self) -> Option<&'static str> {
        [("app", &self.app), ("uri", &self.uri), ("ip", &self.ip)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}

/// Views of one uri as served by one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ViewStats {
    #[schema(example = "ewm-main-service")]
    pub app: String,
    #[schema(example = "/events/1")]
    pub uri: String,
    #[schema(example = 6)]
    pub hits: i64,
}

/// `GET /stats?start=..&end=..&uris=/events/1&uris=/events/2&unique=true`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Window start, inclusive
    #[serde(with = "axum_helpers::datetime::format")]
    #[param(value_type = String, example = "2025-03-01 00:00:00")]
    pub start: DateTime<Utc>,
    /// Window end, inclusive
    #[serde(with = "axum_helpers::datetime::format")]
    #[param(value_type = String, example = "2035-03-01 00:00:00")]
    pub end: DateTime<Utc>,
    /// Restrict to these uris; all uris when empty
    #[serde(default)]
    pub uris: Vec<String>,
    /// Count distinct ips instead of raw hits
    #[serde(default)]
    pub unique: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hit_wire_format() {
        let json = r#"{"app":"ewm-main-service","uri":"/events/1","ip":"10.0.0.1","timestamp":"2025-03-01 12:30:00"}"#;
        let hit: EndpointHit = serde_json::from_str(json).unwrap();
        assert_eq!(hit.id, None);
        assert_eq!(
            hit.timestamp,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap()
        );

        let back = serde_json::to_value(&hit).unwrap();
        assert!(back.get("id").is_none());
        assert_eq!(back["timestamp"], "2025-03-01 12:30:00");
    }

    #[test]
    fn test_blank_fields_are_detected() {
        let mut hit = EndpointHit::new("app", "/events", "10.0.0.1", Utc::now());
        assert!(hit.validate().is_ok());
        assert_eq!(hit.has_blank_field(), None);

        hit.ip = "   ".into();
        assert!(hit.validate().is_ok());
        assert_eq!(hit.has_blank_field(), Some("ip"));
    }
}
