//! Cumulative scheduler counters.
//!
//! [`SchedulerMetrics`] is updated in place by every trigger handler and
//! never reset by the scheduler itself. Hosts read it for telemetry; tests
//! use it to observe paths that leave no other trace.

/// Counters accumulated over the scheduler's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchedulerMetrics {
    /// Number of drain passes run.
    pub drains: u64,
    /// Queue entries evaluated for automatic starts.
    pub workstations_evaluated: u64,
    /// Queue entries discarded because their entity no longer existed.
    pub stale_discarded: u64,
    /// Successful `start_automatic` calls.
    pub automatic_starts: u64,
    /// Successful `start_manual` calls.
    pub manual_starts: u64,
    /// Manual requests dropped without a start.
    pub manual_dropped: u64,
    /// Successful `finish` calls.
    pub finishes: u64,
    /// Due runs skipped because their process id is no longer registered.
    pub unknown_finish_skips: u64,
    /// Enqueues that arrived while the guard was held.
    pub deferred_enqueues: u64,
    /// Enqueues skipped because the workstation was already queued.
    pub deduplicated_enqueues: u64,
    /// Timer triggers ignored without finalizing anything.
    pub ignored_timers: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SchedulerMetrics::default();
        assert_eq!(m.drains, 0);
        assert_eq!(m.workstations_evaluated, 0);
        assert_eq!(m.stale_discarded, 0);
        assert_eq!(m.automatic_starts, 0);
        assert_eq!(m.manual_starts, 0);
        assert_eq!(m.manual_dropped, 0);
        assert_eq!(m.finishes, 0);
        assert_eq!(m.unknown_finish_skips, 0);
        assert_eq!(m.deferred_enqueues, 0);
        assert_eq!(m.deduplicated_enqueues, 0);
        assert_eq!(m.ignored_timers, 0);
    }
}
