use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_users_and_categories::{Categories, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Events::Annotation, 2000))
                    .col(string_len(Events::Description, 7000))
                    .col(string_len(Events::Title, 120))
                    .col(big_integer(Events::CategoryId))
                    .col(big_integer(Events::InitiatorId))
                    .col(timestamp_with_time_zone(Events::EventDate))
                    .col(float(Events::Lat))
                    .col(float(Events::Lon))
                    .col(boolean(Events::Paid).default(false))
                    .col(integer(Events::ParticipantLimit).default(0))
                    .col(boolean(Events::RequestModeration).default(true))
                    .col(string_len(Events::State, 20).default("PENDING"))
                    .col(
                        timestamp_with_time_zone(Events::CreatedOn)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Events::PublishedOn))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_category_id")
                            .from(Events::Table, Events::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_initiator_id")
                            .from(Events::Table, Events::InitiatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_events_initiator_id", Events::InitiatorId),
            ("idx_events_category_id", Events::CategoryId),
            ("idx_events_state", Events::State),
            ("idx_events_event_date", Events::EventDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Events::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Events {
    Table,
    Id,
    Annotation,
    Description,
    Title,
    CategoryId,
    InitiatorId,
    EventDate,
    Lat,
    Lon,
    Paid,
    ParticipantLimit,
    RequestModeration,
    State,
    CreatedOn,
    PublishedOn,
}
