//! View counts of events, backed by the stats service.
//!
//! Recording is fire-and-forget. Reading is bounded by a timeout, and any
//! failure counts every event as unviewed instead of failing the request.

use chrono::{DateTime, Months, Utc};
use domain_stats::ViewStatsClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::models::Event;

/// Uri recorded for the public listing.
pub const EVENTS_URI: &str = "/events";

pub fn event_uri(id: i64) -> String {
    format!("{}/{}", EVENTS_URI, id)
}

/// `/events/42` → 42
fn event_id_from_uri(uri: &str) -> Option<i64> {
    uri.rsplit('/').next()?.parse().ok()
}

fn one_year_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(12)).unwrap_or(now)
}

/// Which window views are counted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWindow {
    /// From the oldest event's creation until now
    SinceCreated,
    /// The last twelve months
    LastYear,
}

#[derive(Clone)]
pub struct ViewCounter {
    client: Arc<dyn ViewStatsClient>,
    timeout: Duration,
}

impl ViewCounter {
    pub fn new(client: Arc<dyn ViewStatsClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Report a view without waiting for the stats service.
    pub fn record(&self, uri: impl Into<String>, ip: impl Into<String>) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let uri = uri.into();
        let ip = ip.into();

        tokio::spawn(async move {
            if let Err(e) = client.record_view(&uri, &ip, Utc::now()).await {
                tracing::warn!(uri = %uri, error = %e, "Failed to record view");
            }
        })
    }

    /// Unique views per event id. Events without views are absent.
    pub async fn count(&self, events: &[Event], window: ViewWindow) -> HashMap<i64, i64> {
        if events.is_empty() {
            return HashMap::new();
        }

        let now = Utc::now();
        let start = match window {
            ViewWindow::SinceCreated => events
                .iter()
                .map(|e| e.created_on)
                .min()
                .unwrap_or_else(|| one_year_before(now)),
            ViewWindow::LastYear => one_year_before(now),
        };
        let uris: Vec<String> = events.iter().map(|e| event_uri(e.id)).collect();

        let call = self.client.aggregate_views(&uris, start, now, true);
        let views = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(views)) => views,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, events = events.len(), "Stats unavailable, views count as 0");
                return HashMap::new();
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "Stats call timed out, views count as 0");
                return HashMap::new();
            }
        };

        views
            .into_iter()
            .filter_map(|(uri, hits)| event_id_from_uri(&uri).map(|id| (id, hits)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockStatsClient, event};
    use domain_stats::StatsError;

    #[test]
    fn test_uri_round_trip() {
        assert_eq!(event_uri(42), "/events/42");
        assert_eq!(event_id_from_uri("/events/42"), Some(42));
        assert_eq!(event_id_from_uri("/events"), None);
    }

    #[tokio::test]
    async fn test_single_call_over_oldest_creation() {
        let mut older = event(1, 1);
        older.created_on = Utc::now() - chrono::Duration::days(30);
        let newer = event(2, 1);
        let oldest = older.created_on;

        let mut client = MockStatsClient::new();
        client
            .expect_aggregate_views()
            .withf(move |uris, start, _, unique| {
                uris == ["/events/1".to_string(), "/events/2".to_string()]
                    && *start == oldest
                    && *unique
            })
            .times(1)
            .returning(|_, _, _, _| Ok(HashMap::from([("/events/2".to_string(), 7)])));

        let counter = ViewCounter::new(Arc::new(client), Duration::from_secs(1));
        let views = counter.count(&[older, newer], ViewWindow::SinceCreated).await;

        assert_eq!(views.get(&2), Some(&7));
        assert_eq!(views.get(&1), None);
    }

    #[tokio::test]
    async fn test_no_events_no_call() {
        let client = MockStatsClient::new();
        let counter = ViewCounter::new(Arc::new(client), Duration::from_secs(1));
        assert!(counter.count(&[], ViewWindow::LastYear).await.is_empty());
    }

    #[tokio::test]
    async fn test_stats_failure_degrades_to_empty() {
        let mut client = MockStatsClient::new();
        client
            .expect_aggregate_views()
            .returning(|_, _, _, _| Err(StatsError::Remote("connection refused".into())));

        let counter = ViewCounter::new(Arc::new(client), Duration::from_secs(1));
        assert!(counter.count(&[event(1, 1)], ViewWindow::LastYear).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stats_times_out() {
        struct Slow;

        #[async_trait::async_trait]
        impl ViewStatsClient for Slow {
            async fn record_view(&self, _: &str, _: &str, _: DateTime<Utc>) -> domain_stats::StatsResult<()> {
                Ok(())
            }

            async fn aggregate_views(
                &self,
                _: &[String],
                _: DateTime<Utc>,
                _: DateTime<Utc>,
                _: bool,
            ) -> domain_stats::StatsResult<HashMap<String, i64>> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(HashMap::from([("/events/1".to_string(), 1)]))
            }
        }

        let counter = ViewCounter::new(Arc::new(Slow), Duration::from_millis(100));
        assert!(counter.count(&[event(1, 1)], ViewWindow::LastYear).await.is_empty());
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        let mut client = MockStatsClient::new();
        client
            .expect_record_view()
            .withf(|uri, ip, _| uri == "/events" && ip == "10.0.0.1")
            .times(1)
            .returning(|_, _, _| Err(StatsError::Remote("down".into())));

        let counter = ViewCounter::new(Arc::new(client), Duration::from_secs(1));
        counter.record(EVENTS_URI, "10.0.0.1").await.unwrap();
    }
}
