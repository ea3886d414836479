use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, NewCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: NewCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: i64) -> CategoryResult<Option<Category>>;

    /// Categories among `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[i64]) -> CategoryResult<Vec<Category>>;

    /// Page of categories ordered by id
    async fn list(&self, offset: u64, limit: u64) -> CategoryResult<Vec<Category>>;

    async fn rename(&self, id: i64, name: String) -> CategoryResult<Category>;

    async fn delete(&self, id: i64) -> CategoryResult<bool>;

    /// Case-insensitive name lookup, ignoring the category `exclude`
    async fn exists_by_name(&self, name: &str, exclude: Option<i64>) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<i64, Category>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(categories: &HashMap<i64, Category>, name: &str, exclude: Option<i64>) -> bool {
    categories
        .values()
        .any(|c| Some(c.id) != exclude && c.name.to_lowercase() == name.to_lowercase())
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: NewCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if name_taken(&categories, &input.name, None) {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: input.name,
        };
        categories.insert(category.id, category.clone());

        tracing::info!(category_id = category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: i64) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut found: Vec<Category> = ids
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect();
        found.sort_by_key(|c| c.id);
        found.dedup_by_key(|c| c.id);
        Ok(found)
    }

    async fn list(&self, offset: u64, limit: u64) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut result: Vec<Category> = categories.values().cloned().collect();
        result.sort_by_key(|c| c.id);
        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn rename(&self, id: i64, name: String) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if name_taken(&categories, &name, Some(id)) {
            return Err(CategoryError::DuplicateName(name));
        }

        let category = categories.get_mut(&id).ok_or(CategoryError::NotFound(id))?;
        category.name = name;

        tracing::info!(category_id = id, "Renamed category");
        Ok(category.clone())
    }

    async fn delete(&self, id: i64) -> CategoryResult<bool> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }

    async fn exists_by_name(&self, name: &str, exclude: Option<i64>) -> CategoryResult<bool> {
        let categories = self.categories.read().await;
        Ok(name_taken(&categories, name, exclude))
    }
}
