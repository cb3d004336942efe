use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter};

use crate::data::INSERT_CHUNK_SIZE;

pub struct PriceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PriceRepository<'a, C> {
    /// Creates a new instance of [`PriceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts price rows in chunks.
    pub async fn insert_many(&self, prices: Vec<entity::price::ActiveModel>) -> Result<(), DbErr> {
        for chunk in prices.chunks(INSERT_CHUNK_SIZE) {
            entity::prelude::Price::insert_many(chunk.to_vec())
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    /// Deletes every price row.
    pub async fn delete_all(&self) -> Result<DeleteResult, DbErr> {
        entity::prelude::Price::delete_many().exec(self.db).await
    }

    pub async fn find_by_station_code(
        &self,
        station_code: &str,
    ) -> Result<Vec<entity::price::Model>, DbErr> {
        entity::prelude::Price::find()
            .filter(entity::price::Column::StationCode.eq(station_code))
            .all(self.db)
            .await
    }

    /// Current prices for a set of stations, in one query.
    pub async fn find_by_station_codes(
        &self,
        station_codes: &[String],
    ) -> Result<Vec<entity::price::Model>, DbErr> {
        if station_codes.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Price::find()
            .filter(entity::price::Column::StationCode.is_in(station_codes.iter().cloned()))
            .all(self.db)
            .await
    }
}
