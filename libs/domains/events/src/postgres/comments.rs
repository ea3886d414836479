use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entity::comment as entity;
use crate::error::{EventError, EventResult};
use crate::models::{Comment, CommentStatus};
use crate::repository::CommentRepository;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    db: DatabaseConnection,
}

impl PgCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: Comment) -> EventResult<Comment> {
        let model = entity::ActiveModel::from(comment).insert(&self.db).await?;

        tracing::info!(comment_id = model.id, event_id = model.event_id, "Created comment");
        model.try_into()
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Comment>> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Comment::try_from)
            .transpose()
    }

    async fn save(&self, comment: Comment) -> EventResult<Comment> {
        let id = comment.id;
        let model = entity::ActiveModel::from(comment)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => EventError::comment_not_found(id),
                other => other.into(),
            })?;
        model.try_into()
    }

    async fn delete(&self, id: i64) -> EventResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_event(
        &self,
        event_id: i64,
        status: CommentStatus,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Comment>> {
        entity::Entity::find()
            .filter(entity::Column::EventId.eq(event_id))
            .filter(entity::Column::Status.eq(status.to_string()))
            .order_by_desc(entity::Column::CreatedOn)
            .order_by_desc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Comment::try_from)
            .collect()
    }
}
