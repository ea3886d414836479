use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::error::{EventError, EventResult};
use crate::models::{Event, Location};

/// Sea-ORM Entity for the events table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub annotation: String,
    pub description: String,
    pub title: String,
    pub category_id: i64,
    pub initiator_id: i64,
    pub event_date: DateTimeUtc,
    pub lat: f32,
    pub lon: f32,
    pub paid: bool,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub state: String,
    pub created_on: DateTimeUtc,
    pub published_on: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Event {
    type Error = EventError;

    fn try_from(model: Model) -> EventResult<Self> {
        Ok(Self {
            id: model.id,
            annotation: model.annotation,
            description: model.description,
            category_id: model.category_id,
            initiator_id: model.initiator_id,
            event_date: model.event_date,
            location: Location {
                lat: model.lat,
                lon: model.lon,
            },
            paid: model.paid,
            participant_limit: model.participant_limit,
            request_moderation: model.request_moderation,
            title: model.title,
            state: super::parse_stored("event state", &model.state)?,
            created_on: model.created_on,
            published_on: model.published_on,
        })
    }
}

impl ActiveModel {
    /// Insert form: the id comes from the sequence.
    pub fn for_insert(event: Event) -> Self {
        Self {
            id: NotSet,
            initiator_id: Set(event.initiator_id),
            created_on: Set(event.created_on),
            ..Self::for_update(event)
        }
    }

    /// Update form: initiator and creation time are left untouched.
    pub fn for_update(event: Event) -> Self {
        Self {
            id: Set(event.id),
            annotation: Set(event.annotation),
            description: Set(event.description),
            title: Set(event.title),
            category_id: Set(event.category_id),
            initiator_id: NotSet,
            event_date: Set(event.event_date),
            lat: Set(event.location.lat),
            lon: Set(event.location.lon),
            paid: Set(event.paid),
            participant_limit: Set(event.participant_limit),
            request_moderation: Set(event.request_moderation),
            state: Set(event.state.to_string()),
            created_on: NotSet,
            published_on: Set(event.published_on),
        }
    }
}
