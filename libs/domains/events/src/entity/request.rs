use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::error::{EventError, EventResult};
use crate::models::ParticipationRequest;

/// Sea-ORM Entity for the participation_requests table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participation_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub requester_id: i64,
    pub event_id: i64,
    pub created: DateTimeUtc,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ParticipationRequest {
    type Error = EventError;

    fn try_from(model: Model) -> EventResult<Self> {
        Ok(Self {
            id: model.id,
            requester_id: model.requester_id,
            event_id: model.event_id,
            created: model.created,
            status: super::parse_stored("request status", &model.status)?,
        })
    }
}

impl From<ParticipationRequest> for ActiveModel {
    fn from(request: ParticipationRequest) -> Self {
        Self {
            id: if request.id == 0 { NotSet } else { Set(request.id) },
            requester_id: Set(request.requester_id),
            event_id: Set(request.event_id),
            created: Set(request.created),
            status: Set(request.status.to_string()),
        }
    }
}
