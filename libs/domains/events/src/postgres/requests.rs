use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement, TransactionTrait, Value,
};
use std::collections::HashMap;

use super::{PgEventStore, placeholders};
use crate::entity::{event as event_entity, request as entity};
use crate::error::{EventError, EventResult};
use crate::models::{Event, ParticipationRequest, RequestStatus, StatusUpdateResult};
use crate::moderation;
use crate::repository::{RequestRepository, unique_in_order};

#[derive(Debug, FromQueryResult)]
struct ConfirmedRow {
    event_id: i64,
    confirmed: i64,
}

fn into_requests(models: Vec<entity::Model>) -> EventResult<Vec<ParticipationRequest>> {
    models.into_iter().map(ParticipationRequest::try_from).collect()
}

/// Load an event and hold its row lock until the transaction ends.
async fn lock_event<C: ConnectionTrait>(conn: &C, event_id: i64) -> EventResult<Event> {
    event_entity::Entity::find_by_id(event_id)
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or(EventError::event_not_found(event_id))?
        .try_into()
}

async fn confirmed_for<C: ConnectionTrait>(conn: &C, event_id: i64) -> EventResult<i64> {
    let count = entity::Entity::find()
        .filter(entity::Column::EventId.eq(event_id))
        .filter(entity::Column::Status.eq(RequestStatus::Confirmed.to_string()))
        .count(conn)
        .await?;
    Ok(count as i64)
}

/// Move still-pending `requests` to `status`; Conflict if any of them left PENDING meanwhile.
async fn set_status<C: ConnectionTrait>(
    conn: &C,
    requests: &[ParticipationRequest],
    status: RequestStatus,
) -> EventResult<()> {
    if requests.is_empty() {
        return Ok(());
    }

    let updated = entity::Entity::update_many()
        .col_expr(entity::Column::Status, Expr::value(status.to_string()))
        .filter(entity::Column::Id.is_in(requests.iter().map(|r| r.id)))
        .filter(entity::Column::Status.eq(RequestStatus::Pending.to_string()))
        .exec(conn)
        .await?;
    if updated.rows_affected != requests.len() as u64 {
        return Err(EventError::conflict("Request must have status PENDING"));
    }
    Ok(())
}

#[async_trait]
impl RequestRepository for PgEventStore {
    async fn get_by_id(&self, id: i64) -> EventResult<Option<ParticipationRequest>> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(ParticipationRequest::try_from)
            .transpose()
    }

    async fn find_by_event(&self, event_id: i64) -> EventResult<Vec<ParticipationRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::EventId.eq(event_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        into_requests(models)
    }

    async fn find_by_requester(&self, requester_id: i64) -> EventResult<Vec<ParticipationRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.eq(requester_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        into_requests(models)
    }

    async fn count_confirmed(&self, event_ids: &[i64]) -> EventResult<HashMap<i64, i64>> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT event_id, COUNT(id) AS confirmed FROM participation_requests \
             WHERE status = $1 AND event_id IN ({}) GROUP BY event_id",
            placeholders(2, event_ids.len())
        );
        let mut values: Vec<Value> = vec![RequestStatus::Confirmed.to_string().into()];
        values.extend(event_ids.iter().map(|&id| Value::from(id)));

        let rows = ConfirmedRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| (r.event_id, r.confirmed)).collect())
    }

    async fn submit(
        &self,
        requester_id: i64,
        event_id: i64,
        now: DateTime<Utc>,
    ) -> EventResult<ParticipationRequest> {
        let txn = self.db.begin().await?;

        let event = lock_event(&txn, event_id).await?;
        let live_requests = entity::Entity::find()
            .filter(entity::Column::EventId.eq(event_id))
            .filter(entity::Column::RequesterId.eq(requester_id))
            .filter(entity::Column::Status.ne(RequestStatus::Canceled.to_string()))
            .count(&txn)
            .await?;
        let confirmed = confirmed_for(&txn, event_id).await?;
        let status = moderation::admit_request(&event, requester_id, live_requests > 0, confirmed)?;

        let draft = ParticipationRequest {
            id: 0,
            requester_id,
            event_id,
            created: now,
            status,
        };
        let model = entity::ActiveModel::from(draft).insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(request_id = model.id, event_id, requester_id, status = %status, "Submitted request");
        model.try_into()
    }

    async fn cancel(&self, request_id: i64) -> EventResult<Option<ParticipationRequest>> {
        let Some(model) = entity::Entity::find_by_id(request_id).one(&self.db).await? else {
            return Ok(None);
        };

        // serializes with change_statuses on the same event
        let txn = self.db.begin().await?;
        lock_event(&txn, model.event_id).await?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(RequestStatus::Canceled.to_string());
        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(request_id, "Canceled request");
        updated.try_into().map(Some)
    }

    async fn change_statuses(
        &self,
        event_id: i64,
        request_ids: &[i64],
        target: RequestStatus,
    ) -> EventResult<StatusUpdateResult> {
        let txn = self.db.begin().await?;

        let event = lock_event(&txn, event_id).await?;
        if event.participant_limit == 0 {
            moderation::check_target(target)?;
            return Ok(StatusUpdateResult::default());
        }

        let ids = unique_in_order(request_ids);
        let found: HashMap<i64, ParticipationRequest> = into_requests(
            entity::Entity::find()
                .filter(entity::Column::Id.is_in(ids.iter().copied()))
                .all(&txn)
                .await?,
        )?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

        let mut named = Vec::with_capacity(ids.len());
        for id in ids {
            match found.get(&id) {
                Some(request) if request.event_id == event_id => named.push(request.clone()),
                _ => return Err(EventError::request_not_found(id)),
            }
        }

        let pending = into_requests(
            entity::Entity::find()
                .filter(entity::Column::EventId.eq(event_id))
                .filter(entity::Column::Status.eq(RequestStatus::Pending.to_string()))
                .order_by_asc(entity::Column::Id)
                .all(&txn)
                .await?,
        )?;
        let confirmed = confirmed_for(&txn, event_id).await?;

        let result = moderation::plan_status_change(&event, confirmed, named, pending, target)?;

        set_status(&txn, &result.confirmed_requests, RequestStatus::Confirmed).await?;
        set_status(&txn, &result.rejected_requests, RequestStatus::Rejected).await?;
        txn.commit().await?;

        tracing::info!(
            event_id,
            confirmed = result.confirmed_requests.len(),
            rejected = result.rejected_requests.len(),
            "Changed request statuses"
        );
        Ok(result)
    }
}
