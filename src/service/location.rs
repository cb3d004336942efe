use std::collections::HashMap;
use std::time::{Duration, Instant};

use sea_orm::{DatabaseConnection, DbErr};
use tokio::sync::RwLock;

use crate::data::location::LocationRepository;
use crate::data::station::StationRepository;

/// How long the in-memory postcode table is served before a reload.
const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Resolves free-text location queries (a postcode or a suburb name) to a
/// representative coordinate.
///
/// The postcode table is small and changes rarely, so it is cached in memory
/// with a TTL instead of being queried per request.
pub struct LocationResolver {
    db: DatabaseConnection,
    cache: RwLock<Option<PostcodeCache>>,
}

struct PostcodeCache {
    loaded_at: Instant,
    by_postcode: HashMap<String, entity::postcode_location::Model>,
}

impl PostcodeCache {
    fn is_fresh(&self) -> bool {
        self.loaded_at.elapsed() < CACHE_TTL
    }
}

impl LocationResolver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: RwLock::new(None),
        }
    }

    /// Resolves a query to a location, or `None` when nothing matches.
    ///
    /// A four-digit query is treated as a postcode. Anything else is matched
    /// against station suburbs, exact matches first, and mapped to the
    /// postcode of the first matching station that has one.
    pub async fn resolve(
        &self,
        query: &str,
    ) -> Result<Option<entity::postcode_location::Model>, DbErr> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        if query.len() == 4 && query.chars().all(|c| c.is_ascii_digit()) {
            return self.lookup_postcode(query).await;
        }

        let stations = StationRepository::new(&self.db)
            .find_by_suburb_fragment(query)
            .await?;
        let lowered = query.to_lowercase();
        let (exact, partial): (Vec<_>, Vec<_>) = stations.into_iter().partition(|station| {
            station
                .suburb
                .as_deref()
                .is_some_and(|suburb| suburb.to_lowercase() == lowered)
        });

        for station in exact.into_iter().chain(partial) {
            if let Some(postcode) = &station.postcode {
                if let Some(location) = self.lookup_postcode(postcode).await? {
                    return Ok(Some(location));
                }
            }
        }

        Ok(None)
    }

    async fn lookup_postcode(
        &self,
        postcode: &str,
    ) -> Result<Option<entity::postcode_location::Model>, DbErr> {
        {
            let cache = self.cache.read().await;
            if let Some(cache) = cache.as_ref() {
                if cache.is_fresh() {
                    return Ok(cache.by_postcode.get(postcode).cloned());
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have reloaded while we waited for the write lock.
        if !cache.as_ref().is_some_and(PostcodeCache::is_fresh) {
            let locations = LocationRepository::new(&self.db).all().await?;
            *cache = Some(PostcodeCache {
                loaded_at: Instant::now(),
                by_postcode: locations
                    .into_iter()
                    .map(|location| (location.postcode.clone(), location))
                    .collect(),
            });
        }

        Ok(cache
            .as_ref()
            .and_then(|cache| cache.by_postcode.get(postcode).cloned()))
    }
}
