pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_station_table;
mod m20260815_000002_create_price_table;
mod m20260815_000003_create_price_history_table;
mod m20260815_000004_create_postcode_location_table;
mod m20260815_000005_create_sync_lock_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_station_table::Migration),
            Box::new(m20260815_000002_create_price_table::Migration),
            Box::new(m20260815_000003_create_price_history_table::Migration),
            Box::new(m20260815_000004_create_postcode_location_table::Migration),
            Box::new(m20260815_000005_create_sync_lock_table::Migration),
        ]
    }
}
