use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::{ViewStatsClient, sum_by_uri};
use crate::error::StatsResult;
use crate::models::{EndpointHit, StatsQuery};
use crate::repository::HitRepository;
use crate::service::StatsService;

/// Calls a [`StatsService`] in the same process.
///
/// Used when the main service runs without a separate stats server, and in tests.
#[derive(Clone)]
pub struct LocalStatsClient<R: HitRepository> {
    service: StatsService<R>,
    app_name: String,
}

impl<R: HitRepository> LocalStatsClient<R> {
    pub fn new(service: StatsService<R>, app_name: impl Into<String>) -> Self {
        Self {
            service,
            app_name: app_name.into(),
        }
    }
}

#[async_trait]
impl<R: HitRepository> ViewStatsClient for LocalStatsClient<R> {
    async fn record_view(&self, uri: &str, ip: &str, timestamp: DateTime<Utc>) -> StatsResult<()> {
        self.service
            .record_hit(EndpointHit::new(self.app_name.as_str(), uri, ip, timestamp))
            .await?;
        Ok(())
    }

    async fn aggregate_views(
        &self,
        uris: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        unique: bool,
    ) -> StatsResult<HashMap<String, i64>> {
        if uris.is_empty() {
            return Ok(HashMap::new());
        }

        let stats = self
            .service
            .get_stats(StatsQuery {
                start,
                end,
                uris: uris.to_vec(),
                unique,
            })
            .await?;
        Ok(sum_by_uri(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryHitRepository;
    use chrono::Duration;

    #[tokio::test]
    async fn test_recorded_views_are_counted_once_per_ip() {
        let client = LocalStatsClient::new(
            StatsService::new(InMemoryHitRepository::new()),
            "ewm-main-service",
        );
        let now = Utc::now();
        for ip in ["1.1.1.1", "1.1.1.1", "2.2.2.2"] {
            client.record_view("/events/3", ip, now).await.unwrap();
        }
        client.record_view("/events", "1.1.1.1", now).await.unwrap();

        let uris = vec!["/events/3".to_string(), "/events/4".to_string()];
        let views = client
            .aggregate_views(&uris, now - Duration::hours(1), now + Duration::hours(1), true)
            .await
            .unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views["/events/3"], 2);
    }
}
