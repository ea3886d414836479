use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::error::{EventError, EventResult};
use crate::models::Comment;

/// Sea-ORM Entity for the comments table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub event_id: i64,
    pub status: String,
    pub created_on: DateTimeUtc,
    pub updated_on: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Comment {
    type Error = EventError;

    fn try_from(model: Model) -> EventResult<Self> {
        Ok(Self {
            id: model.id,
            text: model.text,
            author_id: model.author_id,
            event_id: model.event_id,
            status: super::parse_stored("comment status", &model.status)?,
            created_on: model.created_on,
            updated_on: model.updated_on,
        })
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: if comment.id == 0 { NotSet } else { Set(comment.id) },
            text: Set(comment.text),
            author_id: Set(comment.author_id),
            event_id: Set(comment.event_id),
            status: Set(comment.status.to_string()),
            created_on: Set(comment.created_on),
            updated_on: Set(comment.updated_on),
        }
    }
}
