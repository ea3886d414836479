//! Shared state handed to route construction.

use domain_events::ViewCounter;

/// Cloned into every router builder; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Views recorded and read through the stats service
    pub views: ViewCounter,
}
