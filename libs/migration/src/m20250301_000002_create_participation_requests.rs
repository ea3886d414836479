use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_users_and_categories::Users;
use crate::m20250301_000001_create_events::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParticipationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParticipationRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(ParticipationRequests::RequesterId))
                    .col(big_integer(ParticipationRequests::EventId))
                    .col(
                        timestamp_with_time_zone(ParticipationRequests::Created)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len(ParticipationRequests::Status, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_requester_id")
                            .from(ParticipationRequests::Table, ParticipationRequests::RequesterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_requests_event_id")
                            .from(ParticipationRequests::Table, ParticipationRequests::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_requests_event_status")
                    .table(ParticipationRequests::Table)
                    .col(ParticipationRequests::EventId)
                    .col(ParticipationRequests::Status)
                    .to_owned(),
            )
            .await?;

        // One live request per requester and event
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS uq_requests_requester_event_live
                    ON participation_requests (requester_id, event_id)
                    WHERE status <> 'CANCELED'
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParticipationRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ParticipationRequests {
    Table,
    Id,
    RequesterId,
    EventId,
    Created,
    Status,
}
