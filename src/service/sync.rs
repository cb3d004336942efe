use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::data::price::PriceRepository;
use crate::data::price_history::PriceHistoryRepository;
use crate::data::station::StationRepository;
use crate::data::sync_lock::SyncLockRepository;
use crate::error::sync::SyncError;
use crate::feed::{FeedClient, FeedSnapshot};
use crate::model::sync::{SyncOutcome, SyncStats};
use crate::util::address::AddressNormalizer;
use crate::util::brand::BrandCanonicalizer;

/// Name of the cross-instance mutex guarding dataset replacement.
pub const SYNC_LOCK_KEY: &str = "fuelwatch:price-sync";

/// Lease on the sync lock; a holder gone longer than this is presumed dead.
const LOCK_LEASE_MINUTES: i64 = 10;

/// Replaces the whole station/price dataset from the upstream feed.
pub struct SyncService {
    db: DatabaseConnection,
    feed_client: FeedClient,
    normalizer: AddressNormalizer,
    brands: BrandCanonicalizer,
    holder: String,
}

impl SyncService {
    pub fn new(db: DatabaseConnection, feed_client: FeedClient) -> Self {
        Self {
            db,
            feed_client,
            normalizer: AddressNormalizer::default(),
            brands: BrandCanonicalizer::default(),
            holder: format!("pid-{}-{}", std::process::id(), Utc::now().timestamp()),
        }
    }

    /// Fetches the upstream snapshot and atomically replaces the dataset.
    ///
    /// The feed is fetched before the lock is taken so a slow upstream never
    /// extends the critical section. Losing the lock to another instance is
    /// a normal outcome, not an error.
    pub async fn synchronize(&self) -> Result<SyncOutcome, SyncError> {
        let snapshot = self.feed_client.fetch_all_prices().await?;

        let lock = SyncLockRepository::new(&self.db);
        let acquired = lock
            .try_acquire(
                SYNC_LOCK_KEY,
                &self.holder,
                Duration::minutes(LOCK_LEASE_MINUTES),
            )
            .await?;
        if !acquired {
            return Ok(SyncOutcome::SkippedConcurrent);
        }

        let result = self.replace_dataset(&snapshot).await;
        if let Err(err) = lock.release(SYNC_LOCK_KEY, &self.holder).await {
            tracing::error!("failed to release sync lock: {err}");
        }

        result.map(SyncOutcome::Completed)
    }

    /// Delete-then-insert replacement inside one transaction. A failure
    /// anywhere rolls back and leaves the previous dataset untouched.
    async fn replace_dataset(&self, snapshot: &FeedSnapshot) -> Result<SyncStats, SyncError> {
        let sync_timestamp = Utc::now().naive_utc();
        let (stations, prices, history) = self.map_snapshot(snapshot, sync_timestamp);
        let stats = SyncStats {
            stations: stations.len(),
            prices: prices.len(),
            history_rows: history.len(),
        };

        let txn = self.db.begin().await?;
        PriceRepository::new(&txn).delete_all().await?;
        StationRepository::new(&txn).delete_all().await?;
        StationRepository::new(&txn).insert_many(stations).await?;
        PriceRepository::new(&txn).insert_many(prices).await?;
        PriceHistoryRepository::new(&txn).insert_many(history).await?;
        txn.commit().await?;

        Ok(stats)
    }

    /// Maps the feed payload into rows, all stamped with the same timestamp.
    fn map_snapshot(
        &self,
        snapshot: &FeedSnapshot,
        sync_timestamp: NaiveDateTime,
    ) -> (
        Vec<entity::station::ActiveModel>,
        Vec<entity::price::ActiveModel>,
        Vec<entity::price_history::ActiveModel>,
    ) {
        let mut seen_codes = HashSet::new();
        let mut stations = Vec::with_capacity(snapshot.stations.len());
        for station in &snapshot.stations {
            if !seen_codes.insert(station.code.clone()) {
                tracing::warn!(
                    station_code = %station.code,
                    "duplicate station in feed payload, keeping the first occurrence"
                );
                continue;
            }

            let brand = station
                .brand
                .clone()
                .unwrap_or_else(|| "Independent".to_string());
            let resolved = self.normalizer.resolve(
                station.suburb.as_deref(),
                station.state.as_deref(),
                station.postcode.as_deref(),
                &station.address,
            );

            stations.push(entity::station::ActiveModel {
                station_code: Set(station.code.clone()),
                canonical_brand: Set(self.brands.canonicalize(&brand)),
                brand: Set(brand),
                name: Set(station.name.clone()),
                address: Set(station.address.clone()),
                suburb: Set(resolved.suburb),
                state: Set(resolved.state),
                postcode: Set(resolved.postcode),
                latitude: Set(station.latitude),
                longitude: Set(station.longitude),
                additive_fuel: Set(station.additive_fuel),
                last_synced: Set(sync_timestamp),
                ..Default::default()
            });
        }

        let mut seen_prices = HashSet::new();
        let mut prices = Vec::with_capacity(snapshot.prices.len());
        let mut history = Vec::with_capacity(snapshot.prices.len());
        for price in &snapshot.prices {
            if !seen_codes.contains(&price.station_code) {
                tracing::warn!(
                    station_code = %price.station_code,
                    fuel_type = %price.fuel_type,
                    "price row references a station absent from the payload, dropping it"
                );
                continue;
            }
            if !seen_prices.insert((price.station_code.clone(), price.fuel_type.clone())) {
                continue;
            }

            prices.push(entity::price::ActiveModel {
                station_code: Set(price.station_code.clone()),
                fuel_type: Set(price.fuel_type.clone()),
                price: Set(price.price),
                price_unit: Set(price.price_unit.clone()),
                description: Set(price.description.clone()),
                last_updated: Set(price.parsed_last_updated()),
                ..Default::default()
            });
            history.push(entity::price_history::ActiveModel {
                station_code: Set(price.station_code.clone()),
                fuel_type: Set(price.fuel_type.clone()),
                price: Set(price.price),
                recorded_at: Set(sync_timestamp),
                ..Default::default()
            });
        }

        (stations, prices, history)
    }
}
