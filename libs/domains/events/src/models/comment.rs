use chrono::{DateTime, Utc};
use domain_users::UserShort;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStatus {
    Pending,
    Published,
    Rejected,
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub event_id: i64,
    pub status: CommentStatus,
    pub created_on: DateTime<Utc>,
    pub updated_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewComment {
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub text: String,
    pub author: UserShort,
    pub event_id: i64,
    #[serde(with = "axum_helpers::datetime::format")]
    #[schema(value_type = String, example = "2025-03-01 12:00:00")]
    pub created_on: DateTime<Utc>,
    #[serde(with = "axum_helpers::datetime::option")]
    #[schema(value_type = Option<String>)]
    pub updated_on: Option<DateTime<Utc>>,
    pub status: CommentStatus,
}

impl CommentDto {
    pub fn new(comment: Comment, author: UserShort) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author,
            event_id: comment.event_id,
            created_on: comment.created_on,
            updated_on: comment.updated_on,
            status: comment.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text_rules() {
        assert!(NewComment { text: "Nice!".into() }.validate().is_ok());
        assert!(NewComment { text: "   ".into() }.validate().is_err());
        assert!(NewComment { text: "x".repeat(2001) }.validate().is_err());
    }
}
