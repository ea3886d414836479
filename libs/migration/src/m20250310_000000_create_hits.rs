use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Hits::App, 255))
                    .col(string_len(Hits::Uri, 512))
                    .col(string_len(Hits::Ip, 64))
                    .col(timestamp_with_time_zone(Hits::Timestamp))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hits_timestamp_uri")
                    .table(Hits::Table)
                    .col(Hits::Timestamp)
                    .col(Hits::Uri)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Hits {
    Table,
    Id,
    App,
    Uri,
    Ip,
    Timestamp,
}
