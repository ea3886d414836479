use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, NewCategory},
    repository::CategoryRepository,
};

#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_write_error(err: sea_orm::DbErr, name: &str) -> CategoryError {
    let msg = err.to_string();
    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        CategoryError::DuplicateName(name.to_string())
    } else {
        CategoryError::Internal(format!("Database error: {}", msg))
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: NewCategory) -> CategoryResult<Category> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &name))?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> CategoryResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list(&self, offset: u64, limit: u64) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn rename(&self, id: i64, name: String) -> CategoryResult<Category> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.name = Set(name.clone());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| map_write_error(e, &name))?;

        tracing::info!(category_id = id, "Renamed category");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> CategoryResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn exists_by_name(&self, name: &str, exclude: Option<i64>) -> CategoryResult<bool> {
        let mut query = entity::Entity::find()
            .filter(Expr::cust_with_values("LOWER(name) = ?", [name.to_lowercase()]));

        if let Some(id) = exclude {
            query = query.filter(entity::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }
}
