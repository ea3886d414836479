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
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Comments::Text, 2000))
                    .col(big_integer(Comments::AuthorId))
                    .col(big_integer(Comments::EventId))
                    .col(string_len(Comments::Status, 20).default("PENDING"))
                    .col(
                        timestamp_with_time_zone(Comments::CreatedOn)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Comments::UpdatedOn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_author_id")
                            .from(Comments::Table, Comments::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_event_id")
                            .from(Comments::Table, Comments::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_event_status")
                    .table(Comments::Table)
                    .col(Comments::EventId)
                    .col(Comments::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Text,
    AuthorId,
    EventId,
    Status,
    CreatedOn,
    UpdatedOn,
}
