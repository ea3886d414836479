//! PostgreSQL implementations of the storage ports.

mod comments;
mod compilations;
mod events;
mod requests;

pub use comments::PgCommentRepository;
pub use compilations::PgCompilationRepository;

use sea_orm::DatabaseConnection;

/// Events and participation requests share a connection so that request
/// decisions can lock the owning event row.
#[derive(Clone)]
pub struct PgEventStore {
    db: DatabaseConnection,
}

impl PgEventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `$from, $from+1, ..` for `count` bound values.
fn placeholders(from: usize, count: usize) -> String {
    (from..from + count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
