pub use sea_orm_migration::prelude::*;

mod m20250301_000000_create_users_and_categories;
mod m20250301_000001_create_events;
mod m20250301_000002_create_participation_requests;
mod m20250301_000003_create_compilations;
mod m20250301_000004_create_comments;
mod m20250310_000000_create_hits;

/// Schema of the main service.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_create_users_and_categories::Migration),
            Box::new(m20250301_000001_create_events::Migration),
            Box::new(m20250301_000002_create_participation_requests::Migration),
            Box::new(m20250301_000003_create_compilations::Migration),
            Box::new(m20250301_000004_create_comments::Migration),
        ]
    }
}

/// Schema of the stats service, which owns its own database.
pub struct StatsMigrator;

#[async_trait::async_trait]
impl MigratorTrait for StatsMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250310_000000_create_hits::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_stats").into_iden()
    }
}
