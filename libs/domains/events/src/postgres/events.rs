use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

use super::PgEventStore;
use crate::entity::event as entity;
use crate::error::{EventError, EventResult};
use crate::models::{Event, EventState};
use crate::repository::EventRepository;
use crate::search::{EventCriteria, EventOrder};

/// LIKE pattern matching `text` as a literal substring under `ESCAPE '\'`.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn condition(criteria: &EventCriteria) -> Condition {
    let mut condition = Condition::all();

    if !criteria.initiators.is_empty() {
        condition = condition.add(entity::Column::InitiatorId.is_in(criteria.initiators.clone()));
    }
    if !criteria.states.is_empty() {
        condition = condition.add(
            entity::Column::State.is_in(criteria.states.iter().map(ToString::to_string)),
        );
    }
    if !criteria.categories.is_empty() {
        condition = condition.add(entity::Column::CategoryId.is_in(criteria.categories.clone()));
    }
    if let Some(text) = &criteria.text {
        let pattern = contains_pattern(text);
        condition = condition.add(Expr::cust_with_values(
            r"(LOWER(annotation) LIKE ? ESCAPE '\' OR LOWER(description) LIKE ? ESCAPE '\')",
            [pattern.clone(), pattern],
        ));
    }
    if let Some(paid) = criteria.paid {
        condition = condition.add(entity::Column::Paid.eq(paid));
    }
    if let Some(start) = criteria.range_start {
        condition = condition.add(entity::Column::EventDate.gte(start));
    }
    if let Some(end) = criteria.range_end {
        condition = condition.add(entity::Column::EventDate.lte(end));
    }

    condition
}

fn into_events(models: Vec<entity::Model>) -> EventResult<Vec<Event>> {
    models.into_iter().map(Event::try_from).collect()
}

#[async_trait]
impl EventRepository for PgEventStore {
    async fn create(&self, event: Event) -> EventResult<Event> {
        let model = entity::ActiveModel::for_insert(event).insert(&self.db).await?;

        tracing::info!(event_id = model.id, initiator_id = model.initiator_id, "Created event");
        model.try_into()
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Event::try_from)
            .transpose()
    }

    async fn save(&self, event: Event, expected: EventState) -> EventResult<Event> {
        let id = event.id;
        let txn = self.db.begin().await?;

        // re-checked by Postgres after any concurrent writer on the row commits
        let updated = entity::Entity::update_many()
            .set(entity::ActiveModel::for_update(event))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::State.eq(expected.to_string()))
            .exec(&txn)
            .await?;

        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(EventError::event_not_found(id))?;
        if updated.rows_affected == 0 {
            let current = Event::try_from(model)?;
            return Err(EventError::state_changed(id, current.state));
        }
        txn.commit().await?;

        tracing::info!(event_id = id, state = %model.state, "Updated event");
        model.try_into()
    }

    async fn search(
        &self,
        criteria: &EventCriteria,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let mut query = entity::Entity::find().filter(condition(criteria));

        query = match criteria.order {
            EventOrder::Id => query.order_by_asc(entity::Column::Id),
            EventOrder::EventDate => query
                .order_by_asc(entity::Column::EventDate)
                .order_by_asc(entity::Column::Id),
        };

        let models = query.offset(offset).limit(limit).all(&self.db).await?;
        into_events(models)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> EventResult<Vec<Event>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        into_events(models)
    }

    async fn exists_by_category(&self, category_id: i64) -> EventResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
