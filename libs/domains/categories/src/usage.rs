use async_trait::async_trait;

use crate::error::CategoryResult;

/// Answers whether any event still references a category.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryUsage: Send + Sync {
    async fn has_events(&self, category_id: i64) -> CategoryResult<bool>;
}

/// For deployments and tests without an event store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCategoryUsage;

#[async_trait]
impl CategoryUsage for NoCategoryUsage {
    async fn has_events(&self, _category_id: i64) -> CategoryResult<bool> {
        Ok(false)
    }
}
