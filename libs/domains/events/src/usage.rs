use async_trait::async_trait;
use domain_categories::{CategoryError, CategoryResult, CategoryUsage};
use std::sync::Arc;

use crate::repository::EventRepository;

/// Lets the categories domain refuse deleting a category that events still use.
#[derive(Clone)]
pub struct EventCategoryUsage {
    events: Arc<dyn EventRepository>,
}

impl EventCategoryUsage {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl CategoryUsage for EventCategoryUsage {
    async fn has_events(&self, category_id: i64) -> CategoryResult<bool> {
        self.events
            .exists_by_category(category_id)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))
    }
}
