//! Collaborator traits the scheduler calls into.
//!
//! The scheduler owns none of the simulation state. Each trigger handler
//! receives a [`Services`] bundle borrowing the host's entity store,
//! process registry, process logic, timer service, and clock. Process
//! logic in turn receives an [`OpsContext`] that lets it mutate the store,
//! schedule timers, and publish state-change events back to the scheduler.

use crate::component::{ProcessingState, TypeSet, WorkstationDescriptor};
use crate::error::OpsError;
use crate::event::ProcessRequest;
use crate::id::{EntityId, GameTime, ProcessId};
use crate::process::{Process, ProcessList};

/// Component storage for workstation entities.
pub trait EntityStore {
    /// Whether `entity` is still alive.
    fn exists(&self, entity: EntityId) -> bool;

    /// The workstation descriptor on `entity`, if any.
    fn descriptor(&self, entity: EntityId) -> Option<&WorkstationDescriptor>;

    /// The processing state on `entity`, if any.
    fn processing_state(&self, entity: EntityId) -> Option<&ProcessingState>;

    /// Mutable processing state on `entity`, if any.
    fn processing_state_mut(&mut self, entity: EntityId) -> Option<&mut ProcessingState>;

    /// Attach or replace the processing state on `entity`.
    ///
    /// Returns `false` if the entity does not exist.
    fn insert_processing_state(&mut self, entity: EntityId, state: ProcessingState) -> bool;

    /// Detach the processing state from `entity`.
    fn remove_processing_state(&mut self, entity: EntityId) -> Option<ProcessingState>;
}

/// Lookup of registered process definitions.
pub trait ProcessRegistry {
    /// All processes whose type is in `types`.
    ///
    /// May return zero, one, or many entries, in registry order.
    fn processes_with_types(&self, types: &TypeSet) -> ProcessList;

    /// The process with `id`, provided its type is in `types`.
    fn process_by_id(&self, types: &TypeSet, id: &ProcessId) -> Option<Process>;
}

/// Schedules wake-ups at an absolute game time.
///
/// When a scheduled action comes due, the host delivers a delayed-action
/// trigger carrying the same `action_id` back to the scheduler.
pub trait DelayedActions {
    /// Schedule `action_id` on `entity` at `due_at`.
    fn schedule(&mut self, entity: EntityId, action_id: &str, due_at: GameTime);
}

/// Source of the current game time.
pub trait GameClock {
    /// The current game time.
    fn now(&self) -> GameTime;
}

/// Receiver of events published by process logic.
pub trait EventSink {
    /// Announce that `workstation`'s processing inputs or state changed.
    fn workstation_state_changed(&mut self, workstation: EntityId);
}

/// Mutable access handed to [`ProcessOps`] for the duration of one call.
pub struct OpsContext<'a> {
    /// Entity storage.
    pub store: &'a mut dyn EntityStore,
    /// Timer service for scheduling completion wake-ups.
    pub timers: &'a mut dyn DelayedActions,
    /// Sink for state-change events.
    pub events: &'a mut dyn EventSink,
}

/// Domain-specific start and finish logic for processes.
///
/// Implementations are expected to be monotone: a successful start leaves
/// the process type present in the workstation's [`ProcessingState`] and
/// schedules a completion timer, and a successful finish removes it.
/// Refusals are reported as [`OpsError`] and are never retried.
pub trait ProcessOps {
    /// Start `process` on `workstation` without a user request.
    fn start_automatic(
        &mut self,
        ctx: &mut OpsContext<'_>,
        workstation: EntityId,
        process: &Process,
        now: GameTime,
    ) -> Result<(), OpsError>;

    /// Start `process` on `workstation` on behalf of `instigator`.
    fn start_manual(
        &mut self,
        ctx: &mut OpsContext<'_>,
        instigator: EntityId,
        workstation: EntityId,
        process: &Process,
        request: &ProcessRequest,
        now: GameTime,
    ) -> Result<(), OpsError>;

    /// Complete a due run of `process` on `workstation`.
    fn finish(
        &mut self,
        ctx: &mut OpsContext<'_>,
        instigator: EntityId,
        workstation: EntityId,
        process: &Process,
    ) -> Result<(), OpsError>;
}

/// Everything a trigger handler needs from the host, borrowed per call.
pub struct Services<'a> {
    /// Entity storage.
    pub store: &'a mut dyn EntityStore,
    /// Process definitions.
    pub registry: &'a dyn ProcessRegistry,
    /// Process start/finish logic.
    pub ops: &'a mut dyn ProcessOps,
    /// Timer service.
    pub timers: &'a mut dyn DelayedActions,
    /// Game clock.
    pub clock: &'a dyn GameClock,
}
