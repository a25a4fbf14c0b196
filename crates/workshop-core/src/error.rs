//! Error and drop-reason types shared by the scheduler and its collaborators.
//!
//! Two families: [`OpsError`] is a hard failure reported by `ProcessOps`
//! and always propagated to the host; [`DropReason`] explains why a
//! trigger was discarded locally and never surfaces as an error.

use std::fmt;

/// Failure reported by a `ProcessOps` start or finish call.
///
/// The scheduler wraps this in its own error with the workstation and
/// process attached and never retries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct OpsError {
    /// Human-readable description of the refusal.
    pub reason: String,
}

impl OpsError {
    /// Create an error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Why a trigger or queue entry was discarded without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The workstation carries no descriptor component.
    MissingDescriptor,
    /// The registry has no process with the stated id among the
    /// workstation's supported types.
    UnknownProcessId,
    /// A run of the requested process type is already in flight.
    BusyType,
    /// The entity no longer exists.
    StaleEntity,
    /// A timer fired on a workstation with no processing state.
    MissingProcessingState,
    /// A timer fired with an action id other than
    /// [`WORKSTATION_PROCESSING`](crate::WORKSTATION_PROCESSING).
    UnrelatedAction,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescriptor => write!(f, "workstation has no descriptor"),
            Self::UnknownProcessId => write!(f, "process id not registered"),
            Self::BusyType => write!(f, "process type already running"),
            Self::StaleEntity => write!(f, "entity no longer exists"),
            Self::MissingProcessingState => write!(f, "workstation has no processing state"),
            Self::UnrelatedAction => write!(f, "delayed action is not a processing timer"),
        }
    }
}
