use axum_helpers::PageParams;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::listing::EventAssembler;
use crate::models::{
    Compilation, CompilationDto, CompilationQuery, Event, NewCompilation, UpdateCompilation,
    normalize_ids,
};
use crate::repository::{CompilationRepository, EventRepository};
use crate::views::ViewWindow;

/// Curated, titled sets of events shown on the front page.
#[derive(Clone)]
pub struct CompilationService {
    compilations: Arc<dyn CompilationRepository>,
    events: Arc<dyn EventRepository>,
    assembler: EventAssembler,
}

impl CompilationService {
    pub fn new(
        compilations: Arc<dyn CompilationRepository>,
        events: Arc<dyn EventRepository>,
        assembler: EventAssembler,
    ) -> Self {
        Self {
            compilations,
            events,
            assembler,
        }
    }

    /// Known events among `ids`; unknown ids are dropped.
    async fn existing_ids(&self, ids: &[i64]) -> EventResult<Vec<i64>> {
        let ids = normalize_ids(ids);
        if ids.is_empty() {
            return Ok(ids);
        }
        let found = self.events.find_by_ids(&ids).await?;
        Ok(found.into_iter().map(|e| e.id).collect())
    }

    async fn to_dtos(&self, compilations: Vec<Compilation>) -> EventResult<Vec<CompilationDto>> {
        let ids: Vec<i64> = compilations
            .iter()
            .flat_map(|c| c.event_ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let events = self.events.find_by_ids(&ids).await?;
        let listing = self.assembler.load(&events, ViewWindow::LastYear).await?;
        let by_id: HashMap<i64, Event> = events.into_iter().map(|e| (e.id, e)).collect();

        compilations
            .into_iter()
            .map(|compilation| {
                let events = compilation
                    .event_ids
                    .iter()
                    .filter_map(|id| by_id.get(id).cloned())
                    .map(|e| listing.short(e))
                    .collect::<EventResult<Vec<_>>>()?;
                Ok(CompilationDto {
                    id: compilation.id,
                    events,
                    pinned: compilation.pinned,
                    title: compilation.title,
                })
            })
            .collect()
    }

    async fn to_dto(&self, compilation: Compilation) -> EventResult<CompilationDto> {
        let id = compilation.id;
        self.to_dtos(vec![compilation])
            .await?
            .pop()
            .ok_or(EventError::compilation_not_found(id))
    }

    pub async fn create(&self, input: NewCompilation) -> EventResult<CompilationDto> {
        input.validate()?;

        let compilation = self
            .compilations
            .create(Compilation {
                id: 0,
                title: input.title,
                pinned: input.pinned,
                event_ids: self.existing_ids(&input.events).await?,
            })
            .await?;
        self.to_dto(compilation).await
    }

    pub async fn update(&self, id: i64, patch: UpdateCompilation) -> EventResult<CompilationDto> {
        patch.validate()?;

        let mut compilation = self
            .compilations
            .get_by_id(id)
            .await?
            .ok_or(EventError::compilation_not_found(id))?;

        if let Some(title) = patch.title {
            compilation.title = title;
        }
        if let Some(pinned) = patch.pinned {
            compilation.pinned = pinned;
        }
        if let Some(events) = patch.events {
            compilation.event_ids = self.existing_ids(&events).await?;
        }

        let saved = self.compilations.save(compilation).await?;
        self.to_dto(saved).await
    }

    pub async fn delete(&self, id: i64) -> EventResult<()> {
        if !self.compilations.delete(id).await? {
            return Err(EventError::compilation_not_found(id));
        }
        tracing::info!(compilation_id = id, "Deleted compilation");
        Ok(())
    }

    pub async fn get(&self, id: i64) -> EventResult<CompilationDto> {
        let compilation = self
            .compilations
            .get_by_id(id)
            .await?
            .ok_or(EventError::compilation_not_found(id))?;
        self.to_dto(compilation).await
    }

    pub async fn list(&self, query: CompilationQuery, page: PageParams) -> EventResult<Vec<CompilationDto>> {
        let compilations = self
            .compilations
            .list(query.pinned, page.offset(), page.limit())
            .await?;
        self.to_dtos(compilations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCompilationRepository, InMemoryEventStore};
    use crate::testing::{MockStatsClient, categories, published, users};
    use crate::views::ViewCounter;
    use std::time::Duration;

    async fn service_with(stats: MockStatsClient) -> (CompilationService, InMemoryEventStore) {
        let store = InMemoryEventStore::new();
        let assembler = EventAssembler::new(
            Arc::new(store.clone()),
            Arc::new(users(2).await),
            Arc::new(categories(1).await),
            ViewCounter::new(Arc::new(stats), Duration::from_secs(1)),
        );
        let service = CompilationService::new(
            Arc::new(InMemoryCompilationRepository::new()),
            Arc::new(store.clone()),
            assembler,
        );
        (service, store)
    }

    async fn service() -> (CompilationService, InMemoryEventStore) {
        service_with(crate::testing::quiet_stats()).await
    }

    fn new_compilation(events: Vec<i64>, pinned: bool) -> NewCompilation {
        NewCompilation {
            events,
            pinned,
            title: "Summer picks".into(),
        }
    }

    #[tokio::test]
    async fn test_create_drops_unknown_events() {
        let (service, store) = service().await;
        let event = store.create(published(1, 0, true)).await.unwrap();

        let dto = service
            .create(new_compilation(vec![event.id, 77, event.id], false))
            .await
            .unwrap();
        assert_eq!(dto.events.len(), 1);
        assert_eq!(dto.events[0].id, event.id);
        assert!(!dto.pinned);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (service, store) = service().await;
        let a = store.create(published(1, 0, true)).await.unwrap();
        let b = store.create(published(1, 0, true)).await.unwrap();
        let dto = service.create(new_compilation(vec![a.id], false)).await.unwrap();

        let updated = service
            .update(
                dto.id,
                UpdateCompilation {
                    pinned: Some(true),
                    events: Some(vec![b.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.pinned);
        assert_eq!(updated.title, "Summer picks");
        assert_eq!(updated.events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![b.id]);
    }

    #[tokio::test]
    async fn test_missing_compilation() {
        let (service, _) = service().await;
        assert!(matches!(service.get(5).await, Err(EventError::NotFound { .. })));
        assert!(matches!(service.delete(5).await, Err(EventError::NotFound { .. })));
        assert!(matches!(
            service.update(5, UpdateCompilation::default()).await,
            Err(EventError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_filters_pinned() {
        // one call for the create, one for the listing
        let mut stats = MockStatsClient::new();
        stats
            .expect_aggregate_views()
            .times(2)
            .returning(|_, _, _, _| Ok(HashMap::from([("/events/1".to_string(), 3)])));
        let (service, store) = service_with(stats).await;
        let event = store.create(published(1, 0, true)).await.unwrap();
        service.create(new_compilation(vec![event.id], true)).await.unwrap();
        service.create(new_compilation(vec![], false)).await.unwrap();

        let pinned = service
            .list(CompilationQuery { pinned: Some(true) }, PageParams::default())
            .await
            .unwrap();
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].events[0].views, 3);
    }
}
