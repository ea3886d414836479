//! How the main service talks to the stats server.

mod config;
mod http;
mod local;

pub use config::StatsClientConfig;
pub use http::HttpStatsClient;
pub use local::LocalStatsClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::StatsResult;
use crate::models::ViewStats;

/// Records views of a resource and reads back how often it was viewed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViewStatsClient: Send + Sync {
    async fn record_view(&self, uri: &str, ip: &str, timestamp: DateTime<Utc>) -> StatsResult<()>;

    /// Views per uri over `[start, end]`; uris without hits are absent.
    /// Empty `uris` returns an empty map without contacting the server.
    async fn aggregate_views(
        &self,
        uris: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        unique: bool,
    ) -> StatsResult<HashMap<String, i64>>;
}

/// Collapse per-(app, uri) rows into per-uri totals.
pub(crate) fn sum_by_uri(stats: Vec<ViewStats>) -> HashMap<String, i64> {
    let mut views = HashMap::with_capacity(stats.len());
    for row in stats {
        *views.entry(row.uri).or_insert(0) += row.hits;
    }
    views
}
