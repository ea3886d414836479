use axum_helpers::PageParams;
use chrono::Utc;
use domain_users::{UserRepository, UserShort};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{Comment, CommentDto, CommentStatus, EventState, NewComment};
use crate::repository::{CommentRepository, EventRepository};

/// Comments on published events, held for moderation until an admin publishes them.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            events,
            users,
        }
    }

    async fn author(&self, user_id: i64) -> EventResult<UserShort> {
        self.users
            .get_by_id(user_id)
            .await?
            .map(|u| UserShort::from(&u))
            .ok_or(EventError::user_not_found(user_id))
    }

    async fn find_comment(&self, comment_id: i64) -> EventResult<Comment> {
        self.comments
            .get_by_id(comment_id)
            .await?
            .ok_or(EventError::comment_not_found(comment_id))
    }

    async fn own_comment(&self, user_id: i64, comment_id: i64) -> EventResult<Comment> {
        self.comments
            .get_by_id(comment_id)
            .await?
            .filter(|c| c.author_id == user_id)
            .ok_or(EventError::comment_not_found(comment_id))
    }

    async fn to_dto(&self, comment: Comment) -> EventResult<CommentDto> {
        let author = self.author(comment.author_id).await?;
        Ok(CommentDto::new(comment, author))
    }

    pub async fn add_comment(&self, user_id: i64, event_id: i64, input: NewComment) -> EventResult<CommentDto> {
        input.validate()?;

        let author = self.author(user_id).await?;
        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .ok_or(EventError::event_not_found(event_id))?;
        if event.state != EventState::Published {
            return Err(EventError::BadRequest(
                "You can comment only published events".to_string(),
            ));
        }

        let comment = self
            .comments
            .create(Comment {
                id: 0,
                text: input.text,
                author_id: user_id,
                event_id,
                status: CommentStatus::Pending,
                created_on: Utc::now(),
                updated_on: None,
            })
            .await?;
        Ok(CommentDto::new(comment, author))
    }

    pub async fn update_own_comment(
        &self,
        user_id: i64,
        comment_id: i64,
        input: NewComment,
    ) -> EventResult<CommentDto> {
        input.validate()?;

        let mut comment = self.own_comment(user_id, comment_id).await?;
        if comment.status != CommentStatus::Pending {
            return Err(EventError::BadRequest(
                "Only pending comments can be updated".to_string(),
            ));
        }

        comment.text = input.text;
        comment.updated_on = Some(Utc::now());
        let saved = self.comments.save(comment).await?;
        self.to_dto(saved).await
    }

    pub async fn delete_own_comment(&self, user_id: i64, comment_id: i64) -> EventResult<()> {
        self.own_comment(user_id, comment_id).await?;
        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id, user_id, "Comment deleted by author");
        Ok(())
    }

    /// Published comments of an event, newest first.
    pub async fn published_comments(&self, event_id: i64, page: PageParams) -> EventResult<Vec<CommentDto>> {
        let comments = self
            .comments
            .find_by_event(event_id, CommentStatus::Published, page.offset(), page.limit())
            .await?;

        let mut author_ids: Vec<i64> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<i64, UserShort> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .iter()
            .map(|u| (u.id, UserShort::from(u)))
            .collect();

        comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author_id).cloned().ok_or_else(|| {
                    EventError::Internal(format!(
                        "Author {} of comment {} is missing",
                        comment.author_id, comment.id
                    ))
                })?;
                Ok(CommentDto::new(comment, author))
            })
            .collect()
    }

    async fn moderate(&self, comment_id: i64, status: CommentStatus) -> EventResult<CommentDto> {
        let mut comment = self.find_comment(comment_id).await?;
        comment.status = status;
        comment.updated_on = Some(Utc::now());

        let saved = self.comments.save(comment).await?;
        tracing::info!(comment_id, status = %status, "Comment moderated");
        self.to_dto(saved).await
    }

    pub async fn publish(&self, comment_id: i64) -> EventResult<CommentDto> {
        self.moderate(comment_id, CommentStatus::Published).await
    }

    pub async fn reject(&self, comment_id: i64) -> EventResult<CommentDto> {
        self.moderate(comment_id, CommentStatus::Rejected).await
    }

    pub async fn delete(&self, comment_id: i64) -> EventResult<()> {
        if !self.comments.delete(comment_id).await? {
            return Err(EventError::comment_not_found(comment_id));
        }
        tracing::info!(comment_id, "Comment deleted by admin");
        Ok(())
    }
}
