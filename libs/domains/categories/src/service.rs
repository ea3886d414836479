use axum_helpers::PageParams;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, NewCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::usage::CategoryUsage;

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    usage: Arc<dyn CategoryUsage>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R, usage: Arc<dyn CategoryUsage>) -> Self {
        Self {
            repository: Arc::new(repository),
            usage,
        }
    }

    pub async fn create_category(&self, input: NewCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if self.repository.exists_by_name(&input.name, None).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    /// Rename a category; keeping its own name in a different case is allowed
    pub async fn update_category(&self, id: i64, input: UpdateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.get_category(id).await?;

        if self.repository.exists_by_name(&input.name, Some(id)).await? {
            return Err(CategoryError::DuplicateName(input.name));
        }

        self.repository.rename(id, input.name).await
    }

    /// Delete a category that no event references
    pub async fn delete_category(&self, id: i64) -> CategoryResult<()> {
        self.get_category(id).await?;

        if self.usage.has_events(id).await? {
            return Err(CategoryError::InUse(id));
        }

        if !self.repository.delete(id).await? {
            return Err(CategoryError::NotFound(id));
        }

        tracing::info!(category_id = id, "Deleted category");
        Ok(())
    }

    pub async fn get_category(&self, id: i64) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    pub async fn list_categories(&self, page: PageParams) -> CategoryResult<Vec<Category>> {
        self.repository.list(page.offset(), page.limit()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCategoryRepository;
    use crate::usage::{MockCategoryUsage, NoCategoryUsage};

    fn service_with(usage: impl CategoryUsage + 'static) -> CategoryService<InMemoryCategoryRepository> {
        CategoryService::new(InMemoryCategoryRepository::new(), Arc::new(usage))
    }

    fn named(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let service = service_with(NoCategoryUsage);
        service.create_category(named("Concerts")).await.unwrap();
        let err = service.create_category(named("concerts")).await.unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let service = service_with(NoCategoryUsage);
        let err = service
            .update_category(9, UpdateCategory { name: "x".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Category with id=9 was not found");
    }

    #[tokio::test]
    async fn test_delete_in_use_conflicts_and_keeps_category() {
        let mut usage = MockCategoryUsage::new();
        usage.expect_has_events().returning(|_| Ok(true));

        let service = service_with(usage);
        let cat = service.create_category(named("Concerts")).await.unwrap();

        let err = service.delete_category(cat.id).await.unwrap_err();
        assert!(matches!(err, CategoryError::InUse(_)));
        assert!(service.get_category(cat.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unused_category() {
        let mut usage = MockCategoryUsage::new();
        usage
            .expect_has_events()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(false));

        let service = service_with(usage);
        let cat = service.create_category(named("Concerts")).await.unwrap();
        service.delete_category(cat.id).await.unwrap();
        assert!(matches!(
            service.get_category(cat.id).await,
            Err(CategoryError::NotFound(1))
        ));
    }
}
