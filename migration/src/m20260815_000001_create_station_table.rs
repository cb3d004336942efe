use sea_orm_migration::{prelude::*, schema::*};

static IDX_STATION_SUBURB: &str = "idx_station_suburb";
static IDX_STATION_LAT_LON: &str = "idx_station_lat_lon";
static IDX_STATION_LAST_SYNCED: &str = "idx_station_last_synced";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Station::Table)
                    .if_not_exists()
                    .col(pk_auto(Station::Id))
                    .col(string_uniq(Station::StationCode))
                    .col(string(Station::Brand))
                    .col(string(Station::CanonicalBrand))
                    .col(string(Station::Name))
                    .col(string(Station::Address))
                    .col(string_null(Station::Suburb))
                    .col(string_null(Station::State))
                    .col(string_null(Station::Postcode))
                    .col(double(Station::Latitude))
                    .col(double(Station::Longitude))
                    .col(boolean(Station::AdditiveFuel))
                    .col(timestamp(Station::LastSynced))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATION_SUBURB)
                    .table(Station::Table)
                    .col(Station::Suburb)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATION_LAT_LON)
                    .table(Station::Table)
                    .col(Station::Latitude)
                    .col(Station::Longitude)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATION_LAST_SYNCED)
                    .table(Station::Table)
                    .col(Station::LastSynced)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATION_LAST_SYNCED)
                    .table(Station::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATION_LAT_LON)
                    .table(Station::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATION_SUBURB)
                    .table(Station::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Station::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Station {
    Table,
    Id,
    StationCode,
    Brand,
    CanonicalBrand,
    Name,
    Address,
    Suburb,
    State,
    Postcode,
    Latitude,
    Longitude,
    AdditiveFuel,
    LastSynced,
}
