use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_events::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Compilations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Compilations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Compilations::Title, 50))
                    .col(boolean(Compilations::Pinned).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompilationEvents::Table)
                    .if_not_exists()
                    .col(big_integer(CompilationEvents::CompilationId))
                    .col(big_integer(CompilationEvents::EventId))
                    .primary_key(
                        Index::create()
                            .col(CompilationEvents::CompilationId)
                            .col(CompilationEvents::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_compilation_events_compilation_id")
                            .from(CompilationEvents::Table, CompilationEvents::CompilationId)
                            .to(Compilations::Table, Compilations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_compilation_events_event_id")
                            .from(CompilationEvents::Table, CompilationEvents::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompilationEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Compilations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Compilations {
    Table,
    Id,
    Title,
    Pinned,
}

#[derive(DeriveIden)]
enum CompilationEvents {
    Table,
    CompilationId,
    EventId,
}
