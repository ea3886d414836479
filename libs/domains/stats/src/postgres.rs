use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value,
};

use crate::{
    entity,
    error::StatsResult,
    models::{EndpointHit, ViewStats},
    repository::HitRepository,
};

/// PostgreSQL implementation of HitRepository
#[derive(Clone)]
pub struct PgHitRepository {
    db: DatabaseConnection,
}

impl PgHitRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ViewStatsRow {
    app: String,
    uri: String,
    hits: i64,
}

impl From<ViewStatsRow> for ViewStats {
    fn from(row: ViewStatsRow) -> Self {
        ViewStats {
            app: row.app,
            uri: row.uri,
            hits: row.hits,
        }
    }
}

/// Grouping query; `$1`/`$2` bound the window and `$3..` hold the uri filter.
fn aggregate_sql(uri_count: usize, unique: bool) -> String {
    let counter = if unique { "COUNT(DISTINCT ip)" } else { "COUNT(ip)" };
    let uri_filter = if uri_count == 0 {
        String::new()
    } else {
        let list = (3..3 + uri_count)
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(" AND uri IN ({})", list)
    };

    format!(
        "SELECT app, uri, {counter} AS hits FROM hits \
         WHERE timestamp BETWEEN $1 AND $2{uri_filter} \
         GROUP BY app, uri ORDER BY hits DESC, uri, app"
    )
}

#[async_trait]
impl HitRepository for PgHitRepository {
    async fn save(&self, hit: EndpointHit) -> StatsResult<EndpointHit> {
        let active_model: entity::ActiveModel = hit.into();
        let model = active_model.insert(&self.db).await?;

        tracing::debug!(hit_id = model.id, uri = %model.uri, "Saved hit");
        Ok(model.into())
    }

    async fn aggregate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        uris: &[String],
        unique: bool,
    ) -> StatsResult<Vec<ViewStats>> {
        let mut values: Vec<Value> = vec![start.into(), end.into()];
        values.extend(uris.iter().map(|uri| uri.clone().into()));

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            aggregate_sql(uris.len(), unique),
            values,
        );

        let rows = ViewStatsRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
