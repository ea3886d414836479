use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;

use crate::entity::{compilation as entity, compilation_event as links};
use crate::error::{EventError, EventResult};
use crate::models::Compilation;
use crate::repository::CompilationRepository;

/// PostgreSQL implementation of CompilationRepository.
///
/// Event membership lives in `compilation_events`; rows for deleted events
/// disappear through the foreign key cascade.
#[derive(Clone)]
pub struct PgCompilationRepository {
    db: DatabaseConnection,
}

impl PgCompilationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn event_ids_of<C: ConnectionTrait>(
    conn: &C,
    compilation_ids: &[i64],
) -> EventResult<HashMap<i64, Vec<i64>>> {
    if compilation_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = links::Entity::find()
        .filter(links::Column::CompilationId.is_in(compilation_ids.iter().copied()))
        .order_by_asc(links::Column::EventId)
        .all(conn)
        .await?;

    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
    for row in rows {
        grouped.entry(row.compilation_id).or_default().push(row.event_id);
    }
    Ok(grouped)
}

async fn link_events<C: ConnectionTrait>(
    conn: &C,
    compilation_id: i64,
    event_ids: &[i64],
) -> EventResult<()> {
    if event_ids.is_empty() {
        return Ok(());
    }

    links::Entity::insert_many(event_ids.iter().map(|&id| links::link(compilation_id, id)))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl CompilationRepository for PgCompilationRepository {
    async fn create(&self, compilation: Compilation) -> EventResult<Compilation> {
        let txn = self.db.begin().await?;

        let model = entity::ActiveModel::from(&compilation).insert(&txn).await?;
        link_events(&txn, model.id, &compilation.event_ids).await?;
        txn.commit().await?;

        tracing::info!(compilation_id = model.id, "Created compilation");
        Ok(model.into_compilation(compilation.event_ids))
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Compilation>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let event_ids = event_ids_of(&self.db, &[id]).await?.remove(&id).unwrap_or_default();
        Ok(Some(model.into_compilation(event_ids)))
    }

    async fn save(&self, compilation: Compilation) -> EventResult<Compilation> {
        let txn = self.db.begin().await?;

        if entity::Entity::find_by_id(compilation.id).one(&txn).await?.is_none() {
            return Err(EventError::compilation_not_found(compilation.id));
        }

        let model = entity::ActiveModel::from(&compilation).update(&txn).await?;
        links::Entity::delete_many()
            .filter(links::Column::CompilationId.eq(compilation.id))
            .exec(&txn)
            .await?;
        link_events(&txn, compilation.id, &compilation.event_ids).await?;
        txn.commit().await?;

        tracing::info!(compilation_id = compilation.id, "Updated compilation");
        Ok(model.into_compilation(compilation.event_ids))
    }

    async fn delete(&self, id: i64) -> EventResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        pinned: Option<bool>,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Compilation>> {
        let mut query = entity::Entity::find();
        if let Some(pinned) = pinned {
            query = query.filter(entity::Column::Pinned.eq(pinned));
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut grouped = event_ids_of(&self.db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let event_ids = grouped.remove(&m.id).unwrap_or_default();
                m.into_compilation(event_ids)
            })
            .collect())
    }
}
