use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000001_create_station_table::Station;

static IDX_PRICE_STATION_FUEL: &str = "idx_price_station_code_fuel_type";
static FK_PRICE_STATION_CODE: &str = "fk_price_station_code";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Price::Table)
                    .if_not_exists()
                    .col(pk_auto(Price::Id))
                    .col(string(Price::StationCode))
                    .col(string(Price::FuelType))
                    .col(double(Price::Price))
                    .col(string_null(Price::PriceUnit))
                    .col(string_null(Price::Description))
                    .col(timestamp_null(Price::LastUpdated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PRICE_STATION_FUEL)
                    .table(Price::Table)
                    .col(Price::StationCode)
                    .col(Price::FuelType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PRICE_STATION_CODE)
                    .from_tbl(Price::Table)
                    .from_col(Price::StationCode)
                    .to_tbl(Station::Table)
                    .to_col(Station::StationCode)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PRICE_STATION_CODE)
                    .table(Price::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PRICE_STATION_FUEL)
                    .table(Price::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Price::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Price {
    Table,
    Id,
    StationCode,
    FuelType,
    Price,
    PriceUnit,
    Description,
    LastUpdated,
}
