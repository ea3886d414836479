use chrono::{DateTime, Utc};
use domain_categories::Category;
use domain_users::UserShort;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::not_blank;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

/// What an initiator may do with an unpublished event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStateAction {
    SendToReview,
    CancelReview,
}

/// Moderator decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminStateAction {
    PublishEvent,
    RejectEvent,
}

/// Ordering of the public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSort {
    EventDate,
    Views,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub lat: f32,
    pub lon: f32,
}

/// Stored event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub annotation: String,
    pub description: String,
    pub category_id: i64,
    pub initiator_id: i64,
    pub event_date: DateTime<Utc>,
    pub location: Location,
    pub paid: bool,
    /// 0 means unlimited
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub title: String,
    pub state: EventState,
    pub created_on: DateTime<Utc>,
    pub published_on: Option<DateTime<Utc>>,
}

impl Event {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.initiator_id == user_id
    }

    /// True when the limit is set and `confirmed` has reached it.
    pub fn is_full(&self, confirmed: i64) -> bool {
        self.participant_limit > 0 && confirmed >= i64::from(self.participant_limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[validate(length(min = 20, max = 2000), custom(function = "not_blank"))]
    pub annotation: String,
    pub category: i64,
    #[validate(length(min = 20, max = 7000), custom(function = "not_blank"))]
    pub description: String,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2030-12-31 15:10:05")]
    pub event_date: DateTime<Utc>,
    pub location: Location,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,
    #[serde(default)]
    pub request_moderation: Option<bool>,
    #[validate(length(min = 3, max = 120), custom(function = "not_blank"))]
    pub title: String,
}

/// Fields both initiators and admins may change; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    #[serde(default)]
    #[validate(length(min = 20, max = 2000), custom(function = "not_blank"))]
    pub annotation: Option<String>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 20, max = 7000), custom(function = "not_blank"))]
    pub description: Option<String>,
    #[serde(default, with = "axum_helpers::datetime::option")]
    #[schema(value_type = Option<String>, example = "2030-12-31 15:10:05")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,
    #[serde(default)]
    pub request_moderation: Option<bool>,
    #[serde(default)]
    #[validate(length(min = 3, max = 120), custom(function = "not_blank"))]
    pub title: Option<String>,
}

impl EventChanges {
    /// Overwrite the fields that are present. The category must already be resolved.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(annotation) = self.annotation {
            event.annotation = annotation;
        }
        if let Some(category) = self.category {
            event.category_id = category;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(paid) = self.paid {
            event.paid = paid;
        }
        if let Some(limit) = self.participant_limit {
            event.participant_limit = limit;
        }
        if let Some(moderation) = self.request_moderation {
            event.request_moderation = moderation;
        }
        if let Some(title) = self.title {
            event.title = title;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: EventChanges,
    #[serde(default)]
    pub state_action: Option<UserStateAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventAdminRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: EventChanges,
    #[serde(default)]
    pub state_action: Option<AdminStateAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFull {
    pub id: i64,
    pub annotation: String,
    pub category: Category,
    pub confirmed_requests: i64,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2025-03-01 12:00:00")]
    pub created_on: DateTime<Utc>,
    pub description: String,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2030-12-31 15:10:05")]
    pub event_date: DateTime<Utc>,
    pub initiator: UserShort,
    pub location: Location,
    pub paid: bool,
    pub participant_limit: i32,
    #[serde(with = "axum_helpers::datetime::option")]
    #[schema(value_type = Option<String>)]
    pub published_on: Option<DateTime<Utc>>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventShort {
    pub id: i64,
    pub annotation: String,
    pub category: Category,
    pub confirmed_requests: i64,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2030-12-31 15:10:05")]
    pub event_date: DateTime<Utc>,
    pub initiator: UserShort,
    pub paid: bool,
    pub title: String,
    pub views: i64,
}

impl EventFull {
    pub fn new(event: Event, category: Category, initiator: UserShort, confirmed: i64, views: i64) -> Self {
        Self {
            id: event.id,
            annotation: event.annotation,
            category,
            confirmed_requests: confirmed,
            created_on: event.created_on,
            description: event.description,
            event_date: event.event_date,
            initiator,
            location: event.location,
            paid: event.paid,
            participant_limit: event.participant_limit,
            published_on: event.published_on,
            request_moderation: event.request_moderation,
            state: event.state,
            title: event.title,
            views,
        }
    }
}

impl EventShort {
    pub fn new(event: Event, category: Category, initiator: UserShort, confirmed: i64, views: i64) -> Self {
        Self {
            id: event.id,
            annotation: event.annotation,
            category,
            confirmed_requests: confirmed,
            event_date: event.event_date,
            initiator,
            paid: event.paid,
            title: event.title,
            views,
        }
    }
}

/// `GET /admin/events` filters. States and dates stay raw so that bad values
/// surface as 400 with a precise message.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdminEventQuery {
    /// Initiator ids
    #[serde(default)]
    pub users: Vec<i64>,
    /// PENDING, PUBLISHED or CANCELED
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
    /// `yyyy-MM-dd HH:mm:ss`
    #[serde(default)]
    pub range_start: Option<String>,
    #[serde(default)]
    pub range_end: Option<String>,
}

/// `GET /events` filters.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PublicEventQuery {
    /// Case-insensitive match against annotation and description
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default)]
    pub range_start: Option<String>,
    #[serde(default)]
    pub range_end: Option<String>,
    /// Hide events whose participant limit is reached
    #[serde(default)]
    pub only_available: bool,
    /// EVENT_DATE or VIEWS
    #[serde(default)]
    pub sort: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_event_json() -> serde_json::Value {
        json!({
            "annotation": "A long enough annotation text",
            "category": 1,
            "description": "A long enough description text",
            "eventDate": "2030-12-31 15:10:05",
            "location": {"lat": 55.75, "lon": 37.62},
            "title": "Concert"
        })
    }

    #[test]
    fn test_new_event_defaults_and_validation() {
        let draft: NewEvent = serde_json::from_value(new_event_json()).unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.paid, None);
        assert_eq!(draft.participant_limit, None);

        let mut blank = new_event_json();
        blank["title"] = json!("      ");
        let draft: NewEvent = serde_json::from_value(blank).unwrap();
        assert!(draft.validate().is_err());

        let mut negative = new_event_json();
        negative["participantLimit"] = json!(-1);
        let draft: NewEvent = serde_json::from_value(negative).unwrap();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_update_request_flattens_changes() {
        let patch: UpdateEventAdminRequest = serde_json::from_value(json!({
            "title": "New title",
            "participantLimit": 5,
            "stateAction": "PUBLISH_EVENT"
        }))
        .unwrap();
        assert_eq!(patch.state_action, Some(AdminStateAction::PublishEvent));
        assert_eq!(patch.changes.participant_limit, Some(5));
        assert_eq!(patch.changes.title.as_deref(), Some("New title"));
        assert!(patch.changes.event_date.is_none());

        let short_title: UpdateEventUserRequest =
            serde_json::from_value(json!({"title": "ab"})).unwrap();
        assert!(short_title.validate().is_err());
    }

    #[test]
    fn test_unknown_state_action_is_rejected() {
        let result: Result<UpdateEventUserRequest, _> =
            serde_json::from_value(json!({"stateAction": "PUBLISH_EVENT"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_state_string_round_trip() {
        assert_eq!("PUBLISHED".parse::<EventState>().unwrap(), EventState::Published);
        assert_eq!(EventState::Canceled.to_string(), "CANCELED");
        assert!("published".parse::<EventState>().is_err());
        assert_eq!("VIEWS".parse::<EventSort>().unwrap(), EventSort::Views);
    }

    #[test]
    fn test_is_full() {
        let mut event = sample_event();
        assert!(!event.is_full(100));
        event.participant_limit = 2;
        assert!(!event.is_full(1));
        assert!(event.is_full(2));
    }

    fn sample_event() -> Event {
        Event {
            id: 1,
            annotation: "annotation".into(),
            description: "description".into(),
            category_id: 1,
            initiator_id: 1,
            event_date: Utc::now(),
            location: Location { lat: 0.0, lon: 0.0 },
            paid: false,
            participant_limit: 0,
            request_moderation: true,
            title: "title".into(),
            state: EventState::Pending,
            created_on: Utc::now(),
            published_on: None,
        }
    }
}
