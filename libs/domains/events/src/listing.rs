//! Turns stored events into response DTOs.
//!
//! Everything an event DTO embeds (category, initiator, confirmed count,
//! views) is fetched in one batch per listing, never per event.

use domain_categories::{Category, CategoryRepository};
use domain_users::{UserRepository, UserShort};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFull, EventShort};
use crate::repository::RequestRepository;
use crate::views::{ViewCounter, ViewWindow};

/// Batch-loaded context for a set of events.
#[derive(Debug, Default)]
pub struct Listing {
    confirmed: HashMap<i64, i64>,
    views: HashMap<i64, i64>,
    categories: HashMap<i64, Category>,
    initiators: HashMap<i64, UserShort>,
}

impl Listing {
    pub fn confirmed(&self, event_id: i64) -> i64 {
        self.confirmed.get(&event_id).copied().unwrap_or(0)
    }

    pub fn views(&self, event_id: i64) -> i64 {
        self.views.get(&event_id).copied().unwrap_or(0)
    }

    fn parts(&self, event: &Event) -> EventResult<(Category, UserShort)> {
        let category = self.categories.get(&event.category_id).cloned().ok_or_else(|| {
            EventError::Internal(format!(
                "Category {} of event {} is missing",
                event.category_id, event.id
            ))
        })?;
        let initiator = self.initiators.get(&event.initiator_id).cloned().ok_or_else(|| {
            EventError::Internal(format!(
                "Initiator {} of event {} is missing",
                event.initiator_id, event.id
            ))
        })?;
        Ok((category, initiator))
    }

    pub fn short(&self, event: Event) -> EventResult<EventShort> {
        let (category, initiator) = self.parts(&event)?;
        let (confirmed, views) = (self.confirmed(event.id), self.views(event.id));
        Ok(EventShort::new(event, category, initiator, confirmed, views))
    }

    pub fn full(&self, event: Event) -> EventResult<EventFull> {
        let (category, initiator) = self.parts(&event)?;
        let (confirmed, views) = (self.confirmed(event.id), self.views(event.id));
        Ok(EventFull::new(event, category, initiator, confirmed, views))
    }
}

#[derive(Clone)]
pub struct EventAssembler {
    requests: Arc<dyn RequestRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    views: ViewCounter,
}

impl EventAssembler {
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        views: ViewCounter,
    ) -> Self {
        Self {
            requests,
            users,
            categories,
            views,
        }
    }

    pub async fn load(&self, events: &[Event], window: ViewWindow) -> EventResult<Listing> {
        if events.is_empty() {
            return Ok(Listing::default());
        }

        let event_ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        let category_ids = distinct(events.iter().map(|e| e.category_id));
        let user_ids = distinct(events.iter().map(|e| e.initiator_id));

        let (confirmed, categories, users, views) = futures::join!(
            self.requests.count_confirmed(&event_ids),
            async { self.categories.find_by_ids(&category_ids).await.map_err(EventError::from) },
            async { self.users.find_by_ids(&user_ids).await.map_err(EventError::from) },
            self.views.count(events, window),
        );

        Ok(Listing {
            confirmed: confirmed?,
            views,
            categories: categories?.into_iter().map(|c| (c.id, c)).collect(),
            initiators: users?
                .iter()
                .map(|u| (u.id, UserShort::from(u)))
                .collect(),
        })
    }

    pub async fn full(&self, event: Event) -> EventResult<EventFull> {
        let listing = self
            .load(std::slice::from_ref(&event), ViewWindow::SinceCreated)
            .await?;
        listing.full(event)
    }

    pub async fn shorts(&self, events: Vec<Event>, window: ViewWindow) -> EventResult<Vec<EventShort>> {
        let listing = self.load(&events, window).await?;
        events.into_iter().map(|e| listing.short(e)).collect()
    }

    pub async fn fulls(&self, events: Vec<Event>) -> EventResult<Vec<EventFull>> {
        let listing = self.load(&events, ViewWindow::SinceCreated).await?;
        events.into_iter().map(|e| listing.full(e)).collect()
    }
}

fn distinct(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{EventRepository, InMemoryEventStore};
    use crate::testing::{MockStatsClient, categories, event, published, users};
    use chrono::Utc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_listing_batches_counts_and_views() {
        let store = InMemoryEventStore::new();
        let first = store.create(published(1, 0, true)).await.unwrap();
        let second = store.create(published(1, 0, true)).await.unwrap();
        store.submit(2, first.id, Utc::now()).await.unwrap();
        store.submit(3, first.id, Utc::now()).await.unwrap();

        let mut stats = MockStatsClient::new();
        stats.expect_aggregate_views().times(1).returning(|_, _, _, _| {
            Ok(HashMap::from([("/events/2".to_string(), 4)]))
        });

        let assembler = EventAssembler::new(
            Arc::new(store),
            Arc::new(users(3).await),
            Arc::new(categories(1).await),
            ViewCounter::new(Arc::new(stats), Duration::from_secs(1)),
        );

        let shorts = assembler
            .shorts(vec![first, second], ViewWindow::SinceCreated)
            .await
            .unwrap();

        assert_eq!(shorts[0].confirmed_requests, 2);
        assert_eq!(shorts[0].views, 0);
        assert_eq!(shorts[1].confirmed_requests, 0);
        assert_eq!(shorts[1].views, 4);
        assert_eq!(shorts[0].category.name, "cat1");
        assert_eq!(shorts[0].initiator.name, "user1");
    }

    #[tokio::test]
    async fn test_missing_category_is_internal() {
        let mut orphan = event(1, 1);
        orphan.category_id = 9;

        let assembler = EventAssembler::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(users(1).await),
            Arc::new(categories(1).await),
            ViewCounter::new(Arc::new(crate::testing::quiet_stats()), Duration::from_secs(1)),
        );

        assert!(matches!(
            assembler.full(orphan).await,
            Err(EventError::Internal(_))
        ));
    }
}
