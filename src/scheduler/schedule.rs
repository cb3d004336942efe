//! The sync schedule calendar and tick decision logic.
//!
//! Syncs run at fixed local hours in the feed's home timezone. The decision
//! for one polling tick is a pure function of the clock, the schedule, and
//! the last successful sync, so every rule is unit-testable without a
//! database or timers.

use chrono::{DateTime, Days, Duration, NaiveDateTime, Utc};
use chrono_tz::{Australia, Tz};

use crate::model::sync::{TickDecision, TickReason};
use crate::util::time::local_hour_to_utc;

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Civil timezone the scheduled hours are expressed in.
    pub timezone: Tz,
    /// Local hours of day at which a sync is due.
    pub scheduled_hours: Vec<u32>,
    /// A tick within this many minutes after a scheduled hour counts as
    /// inside that window.
    pub window_minutes: i64,
    /// Slack applied on both sides of a window start when judging whether
    /// the window was missed.
    pub grace_minutes: i64,
    /// Minimum spacing between two syncs; anything sooner is debounced.
    pub min_interval_minutes: i64,
    /// How often the loop re-evaluates the schedule.
    pub poll_interval: std::time::Duration,
    /// Sleep after a failed sync attempt before re-evaluating.
    pub failure_backoff: std::time::Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: Australia::Sydney,
            scheduled_hours: vec![2, 6, 8, 10, 12, 14, 16, 18, 20, 22],
            window_minutes: 15,
            grace_minutes: 15,
            min_interval_minutes: 30,
            poll_interval: std::time::Duration::from_secs(3 * 60),
            failure_backoff: std::time::Duration::from_secs(60),
        }
    }
}

/// Decides whether a sync is due at `now`, given the completion time of the
/// last successful sync.
pub fn decide(
    config: &ScheduleConfig,
    now: DateTime<Utc>,
    last_sync: Option<NaiveDateTime>,
) -> TickDecision {
    // An empty dataset is bootstrapped immediately, schedule or not.
    let Some(last_sync) = last_sync else {
        return TickDecision {
            should_run: true,
            reason: TickReason::FirstRun,
            last_sync: None,
        };
    };

    let last = DateTime::<Utc>::from_naive_utc_and_offset(last_sync, Utc);
    let Some(expected) = most_recent_window_start(config, now) else {
        return TickDecision {
            should_run: false,
            reason: TickReason::OutsideWindow,
            last_sync: Some(last_sync),
        };
    };

    let grace = Duration::minutes(config.grace_minutes);
    let min_interval = Duration::minutes(config.min_interval_minutes);
    let since_last = now - last;

    let reason = if now >= expected + grace && last < expected - grace {
        // The most recent window came and went without a sync.
        if since_last < min_interval {
            TickReason::Debounced
        } else {
            TickReason::CatchUp
        }
    } else if now - expected >= Duration::minutes(config.window_minutes) {
        TickReason::OutsideWindow
    } else if since_last < min_interval {
        TickReason::Debounced
    } else {
        TickReason::ScheduledWindow
    };

    TickDecision {
        should_run: matches!(reason, TickReason::CatchUp | TickReason::ScheduledWindow),
        reason,
        last_sync: Some(last_sync),
    }
}

/// Time until the next scheduled window opens. Used for log context and to
/// size idle sleeps.
pub fn delay_until_next_window(config: &ScheduleConfig, now: DateTime<Utc>) -> Duration {
    let local_date = now.with_timezone(&config.timezone).date_naive();
    let mut hours = config.scheduled_hours.clone();
    hours.sort_unstable();

    // Scan up to three days ahead; daylight-saving gaps can swallow an hour.
    for day_offset in 0..3u64 {
        let date = local_date + Days::new(day_offset);
        for hour in &hours {
            if let Some(start) = local_hour_to_utc(config.timezone, date, *hour) {
                if start > now {
                    return start - now;
                }
            }
        }
    }

    Duration::zero()
}

/// The start of the most recent scheduled window at or before `now`.
fn most_recent_window_start(config: &ScheduleConfig, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let local_date = now.with_timezone(&config.timezone).date_naive();
    let mut hours = config.scheduled_hours.clone();
    hours.sort_unstable();

    for day_offset in 0..3u64 {
        let date = local_date - Days::new(day_offset);
        for hour in hours.iter().rev() {
            if let Some(start) = local_hour_to_utc(config.timezone, date, *hour) {
                if start <= now {
                    return Some(start);
                }
            }
        }
    }

    None
}
