use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::StatsResult;
use crate::models::{EndpointHit, ViewStats};

/// Repository trait for hit persistence and aggregation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Store a hit and return it with its id
    async fn save(&self, hit: EndpointHit) -> StatsResult<EndpointHit>;

    /// Hits in `[start, end]` grouped by (app, uri), most viewed first.
    /// Empty `uris` means every uri; `unique` counts distinct ips.
    async fn aggregate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        uris: &[String],
        unique: bool,
    ) -> StatsResult<Vec<ViewStats>>;
}

/// In-memory implementation of HitRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryHitRepository {
    hits: Arc<RwLock<Vec<EndpointHit>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryHitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HitRepository for InMemoryHitRepository {
    async fn save(&self, mut hit: EndpointHit) -> StatsResult<EndpointHit> {
        hit.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.hits.write().await.push(hit.clone());
        Ok(hit)
    }

    async fn aggregate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        uris: &[String],
        unique: bool,
    ) -> StatsResult<Vec<ViewStats>> {
        let hits = self.hits.read().await;

        let mut groups: HashMap<(&str, &str), (i64, HashSet<&str>)> = HashMap::new();
        for hit in hits.iter().filter(|h| {
            h.timestamp >= start && h.timestamp <= end && (uris.is_empty() || uris.contains(&h.uri))
        }) {
            let entry = groups.entry((hit.app.as_str(), hit.uri.as_str())).or_default();
            entry.0 += 1;
            entry.1.insert(hit.ip.as_str());
        }

        let mut stats: Vec<ViewStats> = groups
            .into_iter()
            .map(|((app, uri), (total, ips))| ViewStats {
                app: app.to_string(),
                uri: uri.to_string(),
                hits: if unique { ips.len() as i64 } else { total },
            })
            .collect();
        stats.sort_by(|a, b| {
            b.hits
                .cmp(&a.hits)
                .then_with(|| a.uri.cmp(&b.uri))
                .then_with(|| a.app.cmp(&b.app))
        });

        Ok(stats)
    }
}
