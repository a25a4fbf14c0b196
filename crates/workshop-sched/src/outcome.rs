//! Results returned by trigger handlers.

use workshop_core::{DropReason, Process};

/// What one drain pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries whose workstation was alive and carried a descriptor.
    pub evaluated: usize,
    /// Entries discarded as stale.
    pub stale: usize,
    /// Automatic starts issued.
    pub started: usize,
}

/// Result of a delayed-action trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Nothing was finalized and the queue was not touched.
    Ignored(DropReason),
    /// Due runs were finalized and the workstation re-evaluated.
    Finalized {
        /// Runs passed to `ProcessOps::finish`.
        finished: usize,
        /// Due runs skipped because their process id was unknown.
        skipped: usize,
        /// The follow-up drain.
        drain: DrainReport,
    },
}

/// Result of a manual process request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManualOutcome {
    /// `ProcessOps::start_manual` accepted the process.
    Started {
        /// The process that was started.
        process: Process,
    },
    /// The request was discarded before reaching `ProcessOps`.
    Dropped(DropReason),
}

/// Result of [`Scheduler::dispatch`](crate::Scheduler::dispatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// An added or state-changed trigger. `None` when the guard was held
    /// and the workstation was only queued.
    Evaluated(Option<DrainReport>),
    /// A delayed-action trigger.
    Completion(CompletionOutcome),
    /// A manual process request.
    Manual(ManualOutcome),
}
