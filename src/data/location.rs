use sea_orm::sea_query::{Expr, ExprTrait, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct LocationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LocationRepository<'a, C> {
    /// Creates a new instance of [`LocationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn all(&self) -> Result<Vec<entity::postcode_location::Model>, DbErr> {
        entity::prelude::PostcodeLocation::find().all(self.db).await
    }

    pub async fn find_by_postcode(
        &self,
        postcode: &str,
    ) -> Result<Option<entity::postcode_location::Model>, DbErr> {
        entity::prelude::PostcodeLocation::find()
            .filter(entity::postcode_location::Column::Postcode.eq(postcode))
            .one(self.db)
            .await
    }

    /// Inserts or refreshes a postcode centroid. Rows marked as manual
    /// overrides are never touched by a seed refresh.
    pub async fn upsert(
        &self,
        location: entity::postcode_location::ActiveModel,
    ) -> Result<(), DbErr> {
        entity::prelude::PostcodeLocation::insert(location)
            .on_conflict(
                OnConflict::column(entity::postcode_location::Column::Postcode)
                    .update_columns([
                        entity::postcode_location::Column::Latitude,
                        entity::postcode_location::Column::Longitude,
                        entity::postcode_location::Column::Label,
                    ])
                    .action_and_where(
                        Expr::col(entity::postcode_location::Column::ManualOverride).eq(false),
                    )
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
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

    mod upsert_tests {
        use sea_orm::ActiveValue::Set;

        use fuelwatch_test_utils::{fixture, TestError};

        use crate::data::location::{tests::setup, LocationRepository};

        /// Expect a repeated upsert to refresh the coordinates in place
        #[tokio::test]
        async fn test_upsert_refreshes_existing_row() -> Result<(), TestError> {
            let db = setup().await?;
            let location_repository = LocationRepository::new(&db);

            location_repository
                .upsert(fixture::postcode_location("2032", -33.92, 151.22, "Kingsford"))
                .await?;
            location_repository
                .upsert(fixture::postcode_location("2032", -33.93, 151.23, "Kingsford"))
                .await?;

            let locations = location_repository.all().await?;
            assert_eq!(locations.len(), 1);
            assert_eq!(locations[0].latitude, -33.93);

            Ok(())
        }

        /// Expect manual overrides to survive a seed refresh
        #[tokio::test]
        async fn test_upsert_keeps_manual_override() -> Result<(), TestError> {
            let db = setup().await?;
            let location_repository = LocationRepository::new(&db);

            let mut manual = fixture::postcode_location("2032", -33.90, 151.20, "Kingsford");
            manual.manual_override = Set(true);
            location_repository.upsert(manual).await?;

            location_repository
                .upsert(fixture::postcode_location("2032", -33.93, 151.23, "Kingsford"))
                .await?;

            let location = location_repository.find_by_postcode("2032").await?.unwrap();
            assert_eq!(location.latitude, -33.90);

            Ok(())
        }
    }
}
