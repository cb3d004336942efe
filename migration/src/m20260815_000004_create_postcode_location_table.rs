use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostcodeLocation::Table)
                    .if_not_exists()
                    .col(pk_auto(PostcodeLocation::Id))
                    .col(string_uniq(PostcodeLocation::Postcode))
                    .col(double(PostcodeLocation::Latitude))
                    .col(double(PostcodeLocation::Longitude))
                    .col(string_null(PostcodeLocation::Label))
                    .col(boolean(PostcodeLocation::ManualOverride))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostcodeLocation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PostcodeLocation {
    Table,
    Id,
    Postcode,
    Latitude,
    Longitude,
    Label,
    ManualOverride,
}
