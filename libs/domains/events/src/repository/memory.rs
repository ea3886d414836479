use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{CommentRepository, CompilationRepository, EventRepository, RequestRepository};
use crate::error::{EventError, EventResult};
use crate::models::{
    Comment, CommentStatus, Compilation, Event, EventState, ParticipationRequest, RequestStatus,
    StatusUpdateResult, normalize_ids,
};
use crate::moderation;
use crate::search::EventCriteria;

#[derive(Debug, Default)]
struct Tables {
    events: BTreeMap<i64, Event>,
    requests: BTreeMap<i64, ParticipationRequest>,
}

impl Tables {
    fn confirmed_for(&self, event_id: i64) -> i64 {
        self.requests
            .values()
            .filter(|r| r.event_id == event_id && r.status == RequestStatus::Confirmed)
            .count() as i64
    }
}

/// Events and participation requests behind one lock (for development/testing).
///
/// Holding the write lock across read-decide-write gives the same per-event
/// serialization the Postgres store gets from `SELECT .. FOR UPDATE`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    tables: Arc<RwLock<Tables>>,
    next_event_id: Arc<AtomicI64>,
    next_request_id: Arc<AtomicI64>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn create(&self, mut event: Event) -> EventResult<Event> {
        event.id = self.next_event_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.tables.write().await.events.insert(event.id, event.clone());

        tracing::info!(event_id = event.id, initiator_id = event.initiator_id, "Created event");
        Ok(event)
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn save(&self, event: Event, expected: EventState) -> EventResult<Event> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .events
            .get_mut(&event.id)
            .ok_or(EventError::event_not_found(event.id))?;
        if stored.state != expected {
            return Err(EventError::state_changed(event.id, stored.state));
        }

        // initiator and creation time never change
        *stored = Event {
            initiator_id: stored.initiator_id,
            created_on: stored.created_on,
            ..event
        };
        Ok(stored.clone())
    }

    async fn search(
        &self,
        criteria: &EventCriteria,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Event> = tables
            .events
            .values()
            .filter(|e| criteria.matches(e))
            .cloned()
            .collect();
        criteria.sort(&mut found);

        Ok(found
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> EventResult<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(normalize_ids(ids)
            .into_iter()
            .filter_map(|id| tables.events.get(&id).cloned())
            .collect())
    }

    async fn exists_by_category(&self, category_id: i64) -> EventResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.events.values().any(|e| e.category_id == category_id))
    }
}

#[async_trait]
impl RequestRepository for InMemoryEventStore {
    async fn get_by_id(&self, id: i64) -> EventResult<Option<ParticipationRequest>> {
        Ok(self.tables.read().await.requests.get(&id).cloned())
    }

    async fn find_by_event(&self, event_id: i64) -> EventResult<Vec<ParticipationRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn find_by_requester(&self, requester_id: i64) -> EventResult<Vec<ParticipationRequest>> {
        let tables = self.tables.read().await;
        Ok(tables
            .requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect())
    }

    async fn count_confirmed(&self, event_ids: &[i64]) -> EventResult<HashMap<i64, i64>> {
        let tables = self.tables.read().await;
        let mut counts = HashMap::new();
        for request in tables.requests.values() {
            if request.status == RequestStatus::Confirmed && event_ids.contains(&request.event_id) {
                *counts.entry(request.event_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn submit(
        &self,
        requester_id: i64,
        event_id: i64,
        now: DateTime<Utc>,
    ) -> EventResult<ParticipationRequest> {
        let mut tables = self.tables.write().await;

        let event = tables
            .events
            .get(&event_id)
            .ok_or(EventError::event_not_found(event_id))?;
        let has_live_request = tables.requests.values().any(|r| {
            r.event_id == event_id
                && r.requester_id == requester_id
                && r.status != RequestStatus::Canceled
        });
        let status = moderation::admit_request(
            event,
            requester_id,
            has_live_request,
            tables.confirmed_for(event_id),
        )?;

        let request = ParticipationRequest {
            id: self.next_request_id.fetch_add(1, Ordering::SeqCst) + 1,
            requester_id,
            event_id,
            created: now,
            status,
        };
        tables.requests.insert(request.id, request.clone());

        tracing::info!(request_id = request.id, event_id, requester_id, status = %status, "Submitted request");
        Ok(request)
    }

    async fn cancel(&self, request_id: i64) -> EventResult<Option<ParticipationRequest>> {
        let mut tables = self.tables.write().await;
        Ok(tables.requests.get_mut(&request_id).map(|request| {
            request.status = RequestStatus::Canceled;
            request.clone()
        }))
    }

    async fn change_statuses(
        &self,
        event_id: i64,
        request_ids: &[i64],
        target: RequestStatus,
    ) -> EventResult<StatusUpdateResult> {
        let mut tables = self.tables.write().await;

        let event = tables
            .events
            .get(&event_id)
            .ok_or(EventError::event_not_found(event_id))?;
        if event.participant_limit == 0 {
            moderation::check_target(target)?;
            return Ok(StatusUpdateResult::default());
        }

        let mut named = Vec::with_capacity(request_ids.len());
        for id in unique_in_order(request_ids) {
            match tables.requests.get(&id) {
                Some(request) if request.event_id == event_id => named.push(request.clone()),
                _ => return Err(EventError::request_not_found(id)),
            }
        }
        let pending: Vec<ParticipationRequest> = tables
            .requests
            .values()
            .filter(|r| r.event_id == event_id && r.status == RequestStatus::Pending)
            .cloned()
            .collect();

        let result = moderation::plan_status_change(
            event,
            tables.confirmed_for(event_id),
            named,
            pending,
            target,
        )?;

        for changed in result
            .confirmed_requests
            .iter()
            .chain(result.rejected_requests.iter())
        {
            tables.requests.insert(changed.id, changed.clone());
        }

        tracing::info!(
            event_id,
            confirmed = result.confirmed_requests.len(),
            rejected = result.rejected_requests.len(),
            "Changed request statuses"
        );
        Ok(result)
    }
}

/// First occurrence of every id, in caller order.
pub(crate) fn unique_in_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// In-memory implementation of CompilationRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCompilationRepository {
    compilations: Arc<RwLock<BTreeMap<i64, Compilation>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCompilationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompilationRepository for InMemoryCompilationRepository {
    async fn create(&self, mut compilation: Compilation) -> EventResult<Compilation> {
        compilation.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        compilation.event_ids = normalize_ids(&compilation.event_ids);
        self.compilations
            .write()
            .await
            .insert(compilation.id, compilation.clone());

        tracing::info!(compilation_id = compilation.id, "Created compilation");
        Ok(compilation)
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Compilation>> {
        Ok(self.compilations.read().await.get(&id).cloned())
    }

    async fn save(&self, mut compilation: Compilation) -> EventResult<Compilation> {
        let mut compilations = self.compilations.write().await;
        if !compilations.contains_key(&compilation.id) {
            return Err(EventError::compilation_not_found(compilation.id));
        }
        compilation.event_ids = normalize_ids(&compilation.event_ids);
        compilations.insert(compilation.id, compilation.clone());
        Ok(compilation)
    }

    async fn delete(&self, id: i64) -> EventResult<bool> {
        Ok(self.compilations.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        pinned: Option<bool>,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Compilation>> {
        let compilations = self.compilations.read().await;
        Ok(compilations
            .values()
            .filter(|c| pinned.is_none_or(|p| c.pinned == p))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of CommentRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<BTreeMap<i64, Comment>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, mut comment: Comment) -> EventResult<Comment> {
        comment.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());

        tracing::info!(comment_id = comment.id, event_id = comment.event_id, "Created comment");
        Ok(comment)
    }

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Comment>> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> EventResult<Comment> {
        let mut comments = self.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(EventError::comment_not_found(comment.id));
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: i64) -> EventResult<bool> {
        Ok(self.comments.write().await.remove(&id).is_some())
    }

    async fn find_by_event(
        &self,
        event_id: i64,
        status: CommentStatus,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut found: Vec<Comment> = comments
            .values()
            .filter(|c| c.event_id == event_id && c.status == status)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)));

        Ok(found
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
