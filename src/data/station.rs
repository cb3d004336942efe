use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter, QueryOrder,
};

use crate::data::INSERT_CHUNK_SIZE;
use crate::util::geo::BoundingBox;

pub struct StationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StationRepository<'a, C> {
    /// Creates a new instance of [`StationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The most recent `last_synced` value across all stations.
    ///
    /// All rows from one sync share a single timestamp, so this is the
    /// completion time of the last successful sync, or `None` before the
    /// first one.
    pub async fn latest_sync_timestamp(&self) -> Result<Option<NaiveDateTime>, DbErr> {
        let station = entity::prelude::Station::find()
            .order_by_desc(entity::station::Column::LastSynced)
            .one(self.db)
            .await?;

        Ok(station.map(|station| station.last_synced))
    }

    /// Inserts stations in chunks.
    pub async fn insert_many(
        &self,
        stations: Vec<entity::station::ActiveModel>,
    ) -> Result<(), DbErr> {
        for chunk in stations.chunks(INSERT_CHUNK_SIZE) {
            entity::prelude::Station::insert_many(chunk.to_vec())
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    /// Deletes every station row.
    pub async fn delete_all(&self) -> Result<DeleteResult, DbErr> {
        entity::prelude::Station::delete_many().exec(self.db).await
    }

    pub async fn all(&self) -> Result<Vec<entity::station::Model>, DbErr> {
        entity::prelude::Station::find().all(self.db).await
    }

    pub async fn find_by_code(
        &self,
        station_code: &str,
    ) -> Result<Option<entity::station::Model>, DbErr> {
        entity::prelude::Station::find()
            .filter(entity::station::Column::StationCode.eq(station_code))
            .one(self.db)
            .await
    }

    /// Stations inside a latitude/longitude rectangle.
    pub async fn find_in_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<entity::station::Model>, DbErr> {
        entity::prelude::Station::find()
            .filter(
                entity::station::Column::Latitude.between(bbox.min_latitude, bbox.max_latitude),
            )
            .filter(
                entity::station::Column::Longitude.between(bbox.min_longitude, bbox.max_longitude),
            )
            .all(self.db)
            .await
    }

    /// Stations whose suburb contains the fragment, case-insensitively.
    pub async fn find_by_suburb_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<entity::station::Model>, DbErr> {
        let pattern = format!("%{}%", fragment.trim().to_lowercase());

        entity::prelude::Station::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::station::Column::Suburb)))
                    .like(pattern),
            )
            .all(self.db)
            .await
    }
}
