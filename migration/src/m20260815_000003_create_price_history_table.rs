use sea_orm_migration::{prelude::*, schema::*};

static IDX_PRICE_HISTORY_LOOKUP: &str = "idx_price_history_station_fuel_recorded";
static IDX_PRICE_HISTORY_RECORDED_AT: &str = "idx_price_history_recorded_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceHistory::Table)
                    .if_not_exists()
                    .col(big_pk_auto(PriceHistory::Id))
                    .col(string(PriceHistory::StationCode))
                    .col(string(PriceHistory::FuelType))
                    .col(double(PriceHistory::Price))
                    .col(timestamp(PriceHistory::RecordedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PRICE_HISTORY_LOOKUP)
                    .table(PriceHistory::Table)
                    .col(PriceHistory::StationCode)
                    .col(PriceHistory::FuelType)
                    .col(PriceHistory::RecordedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PRICE_HISTORY_RECORDED_AT)
                    .table(PriceHistory::Table)
                    .col(PriceHistory::RecordedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRICE_HISTORY_RECORDED_AT)
                    .table(PriceHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRICE_HISTORY_LOOKUP)
                    .table(PriceHistory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PriceHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PriceHistory {
    Table,
    Id,
    StationCode,
    FuelType,
    Price,
    RecordedAt,
}
