//! Events Domain
//!
//! Event lifecycle (draft, moderation, publication), capacity-limited
//! participation requests, compilations and comments. View counts come from
//! the stats service through [`views::ViewCounter`].
//!
//! ```rust,no_run
//! use std::{sync::Arc, time::Duration};
//! use domain_categories::InMemoryCategoryRepository;
//! use domain_events::{handlers, EventService, InMemoryEventStore, ViewCounter};
//! use domain_stats::{InMemoryHitRepository, LocalStatsClient, StatsService};
//! use domain_users::InMemoryUserRepository;
//!
//! let store = Arc::new(InMemoryEventStore::new());
//! let stats = LocalStatsClient::new(StatsService::new(InMemoryHitRepository::new()), "ewm-main-service");
//! let service = EventService::new(
//!     store.clone(),
//!     store,
//!     Arc::new(InMemoryUserRepository::new()),
//!     Arc::new(InMemoryCategoryRepository::new()),
//!     ViewCounter::new(Arc::new(stats), Duration::from_secs(2)),
//! );
//! let router = handlers::admin_events_router(service); // nest under /admin/events
//! ```

pub mod comment_service;
pub mod compilation_service;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod moderation;
pub mod postgres;
pub mod repository;
pub mod request_service;
pub mod search;
pub mod service;
pub mod usage;
pub mod views;

#[cfg(test)]
mod testing;

pub use comment_service::CommentService;
pub use compilation_service::CompilationService;
pub use error::{EventError, EventResult};
pub use listing::EventAssembler;
pub use models::*;
pub use postgres::{PgCommentRepository, PgCompilationRepository, PgEventStore};
pub use repository::{
    CommentRepository, CompilationRepository, EventRepository, InMemoryCommentRepository,
    InMemoryCompilationRepository, InMemoryEventStore, RequestRepository,
};
pub use request_service::RequestService;
pub use search::{EventCriteria, EventOrder};
pub use service::EventService;
pub use usage::EventCategoryUsage;
pub use views::{ViewCounter, ViewWindow};
