//! Stats Domain
//!
//! Server side: records endpoint hits and aggregates them into per-uri view
//! counts (`POST /hit`, `GET /stats`).
//!
//! Client side: [`client::ViewStatsClient`] is how the main service reports
//! views and reads them back, either over HTTP ([`client::HttpStatsClient`]) or
//! in-process ([`client::LocalStatsClient`]).
//!
//! ```rust,no_run
//! use domain_stats::{handlers, InMemoryHitRepository, StatsService};
//!
//! let service = StatsService::new(InMemoryHitRepository::new());
//! let router = handlers::router(service); // mounted at the root of the stats app
//! ```

pub mod client;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use client::{HttpStatsClient, LocalStatsClient, StatsClientConfig, ViewStatsClient};
pub use error::{StatsError, StatsResult};
pub use models::{EndpointHit, StatsQuery, ViewStats};
pub use postgres::PgHitRepository;
pub use repository::{HitRepository, InMemoryHitRepository};
pub use service::StatsService;
