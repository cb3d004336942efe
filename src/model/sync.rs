use chrono::NaiveDateTime;

/// Row counts from a completed synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub stations: usize,
    pub prices: usize,
    pub history_rows: usize,
}

/// Outcome of one synchronization attempt.
///
/// Losing the cross-instance lock is not an error; another instance is
/// already replacing the dataset and this attempt is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncStats),
    SkippedConcurrent,
}

/// Why a scheduler tick did or did not trigger a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReason {
    /// No stations exist at all; bootstrapping ignores the schedule.
    FirstRun,
    /// A scheduled window was missed (e.g. downtime) and is being made up.
    CatchUp,
    /// The current time falls inside a scheduled window.
    ScheduledWindow,
    /// A sync ran too recently; suppressed to avoid double-running.
    Debounced,
    /// Not inside any scheduled window.
    OutsideWindow,
}

/// Decision produced by the scheduler for one polling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDecision {
    pub should_run: bool,
    pub reason: TickReason,
    pub last_sync: Option<NaiveDateTime>,
}
