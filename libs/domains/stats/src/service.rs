use std::sync::Arc;
use validator::Validate;

use crate::error::{StatsError, StatsResult};
use crate::models::{EndpointHit, StatsQuery, ViewStats};
use crate::repository::HitRepository;

/// Service layer for hit recording and aggregation
#[derive(Clone)]
pub struct StatsService<R: HitRepository> {
    repository: Arc<R>,
}

impl<R: HitRepository> StatsService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn record_hit(&self, hit: EndpointHit) -> StatsResult<EndpointHit> {
        hit.validate()
            .map_err(|e| StatsError::Validation(e.to_string()))?;
        if let Some(field) = hit.has_blank_field() {
            return Err(StatsError::Validation(format!("{field}: must not be blank")));
        }

        let saved = self.repository.save(EndpointHit { id: None, ..hit }).await?;
        tracing::debug!(hit_id = ?saved.id, app = %saved.app, uri = %saved.uri, "Recorded hit");
        Ok(saved)
    }

    pub async fn get_stats(&self, query: StatsQuery) -> StatsResult<Vec<ViewStats>> {
        if query.start > query.end {
            return Err(StatsError::BadRequest(
                "Start must not be after end".to_string(),
            ));
        }

        self.repository
            .aggregate(query.start, query.end, &query.uris, query.unique)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryHitRepository, MockHitRepository};
    use chrono::{Duration, Utc};

    fn query(unique: bool, uris: &[&str]) -> StatsQuery {
        let now = Utc::now();
        StatsQuery {
            start: now - Duration::days(1),
            end: now + Duration::days(1),
            uris: uris.iter().map(|u| u.to_string()).collect(),
            unique,
        }
    }

    #[tokio::test]
    async fn test_record_then_aggregate() {
        let service = StatsService::new(InMemoryHitRepository::new());
        for ip in ["10.0.0.1", "10.0.0.1", "10.0.0.2"] {
            service
                .record_hit(EndpointHit::new("ewm", "/events/5", ip, Utc::now()))
                .await
                .unwrap();
        }

        let all = service.get_stats(query(false, &[])).await.unwrap();
        assert_eq!(all[0].hits, 3);

        let unique = service.get_stats(query(true, &["/events/5"])).await.unwrap();
        assert_eq!(unique[0].hits, 2);
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_ignored() {
        let mut mock = MockHitRepository::new();
        mock.expect_save()
            .withf(|hit| hit.id.is_none())
            .returning(|hit| Ok(EndpointHit { id: Some(9), ..hit }));

        let service = StatsService::new(mock);
        let mut hit = EndpointHit::new("ewm", "/events", "10.0.0.1", Utc::now());
        hit.id = Some(100);
        assert_eq!(service.record_hit(hit).await.unwrap().id, Some(9));
    }

    #[tokio::test]
    async fn test_blank_app_is_rejected() {
        let mut mock = MockHitRepository::new();
        mock.expect_save().never();

        let service = StatsService::new(mock);
        let hit = EndpointHit::new(" ", "/events", "10.0.0.1", Utc::now());
        assert!(matches!(
            service.record_hit(hit).await,
            Err(StatsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_start_after_end_is_bad_request() {
        let mut mock = MockHitRepository::new();
        mock.expect_aggregate().never();

        let service = StatsService::new(mock);
        let mut q = query(false, &[]);
        std::mem::swap(&mut q.start, &mut q.end);
        assert!(matches!(
            service.get_stats(q).await,
            Err(StatsError::BadRequest(_))
        ));
    }
}
