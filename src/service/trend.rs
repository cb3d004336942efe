use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};

use crate::data::price::PriceRepository;
use crate::data::price_history::PriceHistoryRepository;
use crate::model::api::{TrendPointDto, TrendSeriesDto};

pub const DEFAULT_PERIOD_DAYS: i64 = 7;
pub const MAX_PERIOD_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct TrendQuery {
    pub station_code: String,
    /// Restricts the result to one fuel; `None` returns every fuel the
    /// station has data for.
    pub fuel_type: Option<String>,
    pub period_days: i64,
}

/// Reconstructs per-fuel price series for one station from the history table.
pub struct TrendService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TrendService<'a> {
    /// Creates a new instance of [`TrendService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// One series per fuel, points ordered oldest first.
    ///
    /// A fuel with no snapshot inside the window is backfilled with its most
    /// recent earlier snapshot, placed at the window start so charts still
    /// show a level. Failing that, the live price stands in, with its
    /// timestamp clamped to the window. Fuels with no data at all are
    /// omitted.
    pub async fn trends(&self, query: &TrendQuery) -> Result<Vec<TrendSeriesDto>, DbErr> {
        let window_start = Utc::now().naive_utc() - Duration::days(query.period_days);

        let history_repository = PriceHistoryRepository::new(self.db);
        let history = history_repository
            .find_in_window(&query.station_code, window_start)
            .await?;
        let live = PriceRepository::new(self.db)
            .find_by_station_code(&query.station_code)
            .await?;

        let fuels: BTreeSet<String> = match &query.fuel_type {
            Some(fuel) => BTreeSet::from([fuel.trim().to_uppercase()]),
            None => history
                .iter()
                .map(|row| row.fuel_type.clone())
                .chain(live.iter().map(|row| row.fuel_type.clone()))
                .collect(),
        };

        let mut series = Vec::with_capacity(fuels.len());
        for fuel_type in fuels {
            let points: Vec<TrendPointDto> = history
                .iter()
                .filter(|row| row.fuel_type.eq_ignore_ascii_case(&fuel_type))
                .map(|row| TrendPointDto {
                    timestamp: row.recorded_at,
                    price: row.price,
                })
                .collect();

            let points = if !points.is_empty() {
                points
            } else if let Some(previous) = history_repository
                .find_latest_before(&query.station_code, &fuel_type, window_start)
                .await?
            {
                vec![TrendPointDto {
                    timestamp: window_start,
                    price: previous.price,
                }]
            } else if let Some(current) = live
                .iter()
                .find(|row| row.fuel_type.eq_ignore_ascii_case(&fuel_type))
            {
                vec![TrendPointDto {
                    timestamp: current.last_updated.unwrap_or(window_start).max(window_start),
                    price: current.price,
                }]
            } else {
                Vec::new()
            };

            if points.is_empty() {
                continue;
            }
            series.push(TrendSeriesDto { fuel_type, points });
        }

        Ok(series)
    }
}
