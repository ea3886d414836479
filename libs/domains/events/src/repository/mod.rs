//! Storage ports of the events domain.

mod memory;

pub use memory::{InMemoryCommentRepository, InMemoryCompilationRepository, InMemoryEventStore};
pub(crate) use memory::unique_in_order;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::EventResult;
use crate::models::{
    Comment, CommentStatus, Compilation, Event, EventState, ParticipationRequest, RequestStatus,
    StatusUpdateResult,
};
use crate::search::EventCriteria;

/// Repository trait for Event persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert `event`; its `id` is assigned by the store
    async fn create(&self, event: Event) -> EventResult<Event>;

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Event>>;

    /// Overwrite the mutable fields of an existing event.
    ///
    /// Applies only while the stored state is still `expected`, the state the
    /// caller's transition was decided on; Conflict otherwise.
    async fn save(&self, event: Event, expected: EventState) -> EventResult<Event>;

    async fn search(
        &self,
        criteria: &EventCriteria,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>>;

    /// Events among `ids` ordered by id; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[i64]) -> EventResult<Vec<Event>>;

    async fn exists_by_category(&self, category_id: i64) -> EventResult<bool>;
}

/// Repository trait for participation requests.
///
/// `submit` and `change_statuses` serialize with each other per event, so the
/// confirmed count they read cannot go stale before they write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> EventResult<Option<ParticipationRequest>>;

    /// Requests for an event, ordered by id
    async fn find_by_event(&self, event_id: i64) -> EventResult<Vec<ParticipationRequest>>;

    async fn find_by_requester(&self, requester_id: i64) -> EventResult<Vec<ParticipationRequest>>;

    /// Confirmed requests per event; events without any are absent
    async fn count_confirmed(&self, event_ids: &[i64]) -> EventResult<HashMap<i64, i64>>;

    /// Admit a request for `event_id` or fail with the rule it breaks
    async fn submit(
        &self,
        requester_id: i64,
        event_id: i64,
        now: DateTime<Utc>,
    ) -> EventResult<ParticipationRequest>;

    /// Mark a request CANCELED; `None` when the id is unknown
    async fn cancel(&self, request_id: i64) -> EventResult<Option<ParticipationRequest>>;

    /// Confirm or reject `request_ids` of `event_id` as one unit of work
    async fn change_statuses(
        &self,
        event_id: i64,
        request_ids: &[i64],
        target: RequestStatus,
    ) -> EventResult<StatusUpdateResult>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompilationRepository: Send + Sync {
    /// Insert `compilation`; its `id` is assigned by the store
    async fn create(&self, compilation: Compilation) -> EventResult<Compilation>;

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Compilation>>;

    /// Replace title, pinned flag and event set
    async fn save(&self, compilation: Compilation) -> EventResult<Compilation>;

    async fn delete(&self, id: i64) -> EventResult<bool>;

    /// Page ordered by id, restricted to `pinned` when given
    async fn list(
        &self,
        pinned: Option<bool>,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Compilation>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert `comment`; its `id` is assigned by the store
    async fn create(&self, comment: Comment) -> EventResult<Comment>;

    async fn get_by_id(&self, id: i64) -> EventResult<Option<Comment>>;

    async fn save(&self, comment: Comment) -> EventResult<Comment>;

    async fn delete(&self, id: i64) -> EventResult<bool>;

    /// Comments of an event with `status`, newest first
    async fn find_by_event(
        &self,
        event_id: i64,
        status: CommentStatus,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Comment>>;
}
