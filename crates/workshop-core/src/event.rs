//! Trigger events consumed by the scheduler.

use crate::id::{EntityId, ProcessId};

/// Action id of the delayed action that marks a processing run as due.
///
/// Shared bit-exact with the host's delayed-action scheduler; timer
/// triggers carrying any other id are ignored.
pub const WORKSTATION_PROCESSING: &str = "WorkstationProcessing";

/// A user request to run a specific process on a workstation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRequest {
    /// The workstation that should run the process.
    pub workstation: EntityId,
    /// Registry id of the requested process.
    pub process_id: ProcessId,
}

impl ProcessRequest {
    /// Create a request for `process_id` on `workstation`.
    pub fn new(workstation: EntityId, process_id: impl Into<ProcessId>) -> Self {
        Self {
            workstation,
            process_id: process_id.into(),
        }
    }
}

/// The events that drive the scheduler.
///
/// # Examples
///
/// ```
/// use workshop_core::{EntityId, Trigger, WORKSTATION_PROCESSING};
///
/// let ws = EntityId::new(0, 0);
/// let timer = Trigger::DelayedAction {
///     workstation: ws,
///     action_id: WORKSTATION_PROCESSING.to_string(),
/// };
/// assert_eq!(timer.workstation(), ws);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A workstation descriptor was attached to a block entity.
    Added {
        /// The new workstation.
        workstation: EntityId,
    },
    /// Something external changed a workstation's processing inputs.
    StateChanged {
        /// The workstation to re-evaluate.
        workstation: EntityId,
    },
    /// A previously scheduled delayed action fired.
    DelayedAction {
        /// The entity the action was scheduled on.
        workstation: EntityId,
        /// The action id it was scheduled with.
        action_id: String,
    },
    /// A user asked a workstation to run a process.
    ProcessRequest {
        /// The entity that issued the request.
        instigator: EntityId,
        /// What was requested.
        request: ProcessRequest,
    },
}

impl Trigger {
    /// The workstation this trigger concerns.
    pub fn workstation(&self) -> EntityId {
        match self {
            Self::Added { workstation }
            | Self::StateChanged { workstation }
            | Self::DelayedAction { workstation, .. } => *workstation,
            Self::ProcessRequest { request, .. } => request.workstation,
        }
    }
}
