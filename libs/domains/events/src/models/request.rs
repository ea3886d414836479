use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

/// A user's request to take part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParticipationRequest {
    pub id: i64,
    #[serde(rename = "requester")]
    pub requester_id: i64,
    #[serde(rename = "event")]
    pub event_id: i64,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2025-03-01 12:00:00")]
    pub created: DateTime<Utc>,
    pub status: RequestStatus,
}

impl ParticipationRequest {
    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }
}

/// Owner decision on a batch of requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    #[validate(length(min = 1))]
    pub request_ids: Vec<i64>,
    /// CONFIRMED or REJECTED
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResult {
    pub confirmed_requests: Vec<ParticipationRequest>,
    pub rejected_requests: Vec<ParticipationRequest>,
}

/// `POST /users/{userId}/requests?eventId=..`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NewRequestQuery {
    pub event_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ParticipationRequest {
            id: 4,
            requester_id: 2,
            event_id: 9,
            created: chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 3, 1, 12, 0, 0).unwrap(),
            status: RequestStatus::Pending,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requester"], 2);
        assert_eq!(json["event"], 9);
        assert_eq!(json["created"], "2025-03-01 12:00:00");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_status_update_request() {
        let body: StatusUpdateRequest =
            serde_json::from_str(r#"{"requestIds":[3,1],"status":"CONFIRMED"}"#).unwrap();
        assert_eq!(body.request_ids, vec![3, 1]);
        assert_eq!(body.status, RequestStatus::Confirmed);

        let empty: StatusUpdateRequest =
            serde_json::from_str(r#"{"requestIds":[],"status":"REJECTED"}"#).unwrap();
        assert!(empty.validate().is_err());
    }
}
