use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::instrument;

use super::{StatsClientConfig, ViewStatsClient, sum_by_uri};
use crate::error::{StatsError, StatsResult};
use crate::models::{EndpointHit, ViewStats};

/// Talks to a remote stats server over HTTP
#[derive(Clone)]
pub struct HttpStatsClient {
    client: reqwest::Client,
    base_url: String,
    app_name: String,
}

impl HttpStatsClient {
    /// Every request is bounded by `config.timeout`
    pub fn new(config: StatsClientConfig) -> StatsResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_name: config.app_name,
        })
    }

    async fn check(response: reqwest::Response) -> StatsResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(StatsError::Remote(format!(
            "stats server answered {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl ViewStatsClient for HttpStatsClient {
    #[instrument(skip(self, timestamp))]
    async fn record_view(&self, uri: &str, ip: &str, timestamp: DateTime<Utc>) -> StatsResult<()> {
        let hit = EndpointHit::new(self.app_name.as_str(), uri, ip, timestamp);

        let response = self
            .client
            .post(format!("{}/hit", self.base_url))
            .json(&hit)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    #[instrument(skip(self, uris), fields(uri_count = uris.len()))]
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

        let mut params: Vec<(&str, String)> = vec![
            ("start", axum_helpers::datetime::to_string(&start)),
            ("end", axum_helpers::datetime::to_string(&end)),
            ("unique", unique.to_string()),
        ];
        params.extend(uris.iter().map(|uri| ("uris", uri.clone())));

        let response = self
            .client
            .get(format!("{}/stats", self.base_url))
            .query(&params)
            .send()
            .await?;
        let stats: Vec<ViewStats> = Self::check(response).await?.json().await?;

        Ok(sum_by_uri(stats))
    }
}
