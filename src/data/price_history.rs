use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::data::INSERT_CHUNK_SIZE;

pub struct PriceHistoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PriceHistoryRepository<'a, C> {
    /// Creates a new instance of [`PriceHistoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends history rows in chunks. History is never updated or deleted by
    /// the application; it only grows.
    pub async fn insert_many(
        &self,
        rows: Vec<entity::price_history::ActiveModel>,
    ) -> Result<(), DbErr> {
        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            entity::prelude::PriceHistory::insert_many(chunk.to_vec())
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    /// A station's history rows recorded at or after `from`, oldest first,
    /// across all fuel types.
    pub async fn find_in_window(
        &self,
        station_code: &str,
        from: NaiveDateTime,
    ) -> Result<Vec<entity::price_history::Model>, DbErr> {
        entity::prelude::PriceHistory::find()
            .filter(entity::price_history::Column::StationCode.eq(station_code))
            .filter(entity::price_history::Column::RecordedAt.gte(from))
            .order_by_asc(entity::price_history::Column::RecordedAt)
            .all(self.db)
            .await
    }

    /// The most recent history row for one fuel strictly before `before`.
    /// Used to backfill a trend window that contains no snapshots of its own.
    pub async fn find_latest_before(
        &self,
        station_code: &str,
        fuel_type: &str,
        before: NaiveDateTime,
    ) -> Result<Option<entity::price_history::Model>, DbErr> {
        entity::prelude::PriceHistory::find()
            .filter(entity::price_history::Column::StationCode.eq(station_code))
            .filter(entity::price_history::Column::FuelType.eq(fuel_type))
            .filter(entity::price_history::Column::RecordedAt.lt(before))
            .order_by_desc(entity::price_history::Column::RecordedAt)
            .one(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;

    use fuelwatch_test_utils::{TestError, TestSetup};

    async fn setup() -> Result<DatabaseConnection, TestError> {
        let test = TestSetup::new().await?;
        test.with_tables().await?;

        Ok(test.db)
    }

    mod find_in_window_tests {
        use chrono::{Duration, Utc};

        use fuelwatch_test_utils::{fixture, TestError};

        use crate::data::price_history::{tests::setup, PriceHistoryRepository};

        /// Expect rows outside the window and other stations to be excluded
        #[tokio::test]
        async fn test_find_in_window_filters_and_orders() -> Result<(), TestError> {
            let db = setup().await?;
            let history_repository = PriceHistoryRepository::new(&db);

            let now = Utc::now().naive_utc();
            history_repository
                .insert_many(vec![
                    fixture::history("1001", "E10", 170.0, now - Duration::days(10)),
                    fixture::history("1001", "E10", 175.0, now - Duration::days(3)),
                    fixture::history("1001", "E10", 179.9, now - Duration::days(1)),
                    fixture::history("2001", "E10", 160.0, now - Duration::days(1)),
                ])
                .await?;

            let rows = history_repository
                .find_in_window("1001", now - Duration::days(7))
                .await?;

            assert_eq!(rows.len(), 2);
            assert!(rows[0].recorded_at < rows[1].recorded_at);
            assert_eq!(rows[1].price, 179.9);

            Ok(())
        }
    }

    mod find_latest_before_tests {
        use chrono::{Duration, Utc};

        use fuelwatch_test_utils::{fixture, TestError};

        use crate::data::price_history::{tests::setup, PriceHistoryRepository};

        /// Expect the newest row older than the cutoff for the given fuel
        #[tokio::test]
        async fn test_find_latest_before_picks_newest_older_row() -> Result<(), TestError> {
            let db = setup().await?;
            let history_repository = PriceHistoryRepository::new(&db);

            let now = Utc::now().naive_utc();
            history_repository
                .insert_many(vec![
                    fixture::history("1001", "E10", 170.0, now - Duration::days(20)),
                    fixture::history("1001", "E10", 172.5, now - Duration::days(9)),
                    fixture::history("1001", "P95", 195.0, now - Duration::days(9)),
                ])
                .await?;

            let row = history_repository
                .find_latest_before("1001", "E10", now - Duration::days(7))
                .await?;

            assert_eq!(row.map(|row| row.price), Some(172.5));

            Ok(())
        }

        /// Expect None when no earlier snapshot exists
        #[tokio::test]
        async fn test_find_latest_before_none_without_rows() -> Result<(), TestError> {
            let db = setup().await?;
            let history_repository = PriceHistoryRepository::new(&db);

            let row = history_repository
                .find_latest_before("1001", "E10", Utc::now().naive_utc())
                .await?;

            assert!(row.is_none());

            Ok(())
        }
    }
}
