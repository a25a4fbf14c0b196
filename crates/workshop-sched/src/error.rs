//! Errors the scheduler propagates to its host.
//!
//! Only hard failures live here. Triggers that are discarded locally
//! (missing descriptor, unknown process id, busy type, stale entity) are
//! reported as [`DropReason`](workshop_core::DropReason) inside outcomes.

use workshop_core::{EntityId, OpsError, ProcessId};

/// A failure that aborts the current trigger.
///
/// The scheduler's guard is always released before one of these is
/// returned, and queue entries not yet drained are kept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// `ProcessOps` refused to start a process. Not retried.
    #[error("start of process '{process}' on workstation {workstation} failed: {source}")]
    StartFailure {
        /// The workstation the start targeted.
        workstation: EntityId,
        /// The process that was refused.
        process: ProcessId,
        /// The refusal.
        #[source]
        source: OpsError,
    },
    /// `ProcessOps` refused to finish a due run.
    #[error("finish of process '{process}' on workstation {workstation} failed: {source}")]
    FinishFailure {
        /// The workstation the run was on.
        workstation: EntityId,
        /// The process that was refused.
        process: ProcessId,
        /// The refusal.
        #[source]
        source: OpsError,
    },
    /// A drain popped `budget` entries without emptying the queue.
    ///
    /// Indicates process logic that reports success without recording a
    /// run while republishing state changes.
    #[error("drain exceeded its budget of {budget} queue entries")]
    DrainBudgetExceeded {
        /// The configured budget.
        budget: usize,
    },
}
