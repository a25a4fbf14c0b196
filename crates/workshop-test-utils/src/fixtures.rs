//! Recording `ProcessOps` fixture.
//!
//! [`RecordingOps`] behaves like a minimal real implementation: starting
//! a process records a run finishing `duration_ms` later and schedules the
//! processing timer; finishing removes the run and drops the component
//! when it empties. Knobs make it republish state changes, refuse
//! specific processes, or misbehave by not recording starts at all.

use std::collections::HashSet;

use workshop_core::{
    EntityId, GameTime, OpsContext, OpsError, Process, ProcessId, ProcessOps, ProcessRequest,
    ProcessRun, ProcessingState, WORKSTATION_PROCESSING,
};

/// One recorded call into [`RecordingOps`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpsCall {
    StartAutomatic {
        workstation: EntityId,
        process: ProcessId,
        now: GameTime,
    },
    StartManual {
        instigator: EntityId,
        workstation: EntityId,
        process: ProcessId,
        now: GameTime,
    },
    Finish {
        instigator: EntityId,
        workstation: EntityId,
        process: ProcessId,
    },
}

impl OpsCall {
    pub fn process(&self) -> &ProcessId {
        match self {
            Self::StartAutomatic { process, .. }
            | Self::StartManual { process, .. }
            | Self::Finish { process, .. } => process,
        }
    }

    pub fn workstation(&self) -> EntityId {
        match self {
            Self::StartAutomatic { workstation, .. }
            | Self::StartManual { workstation, .. }
            | Self::Finish { workstation, .. } => *workstation,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Self::Finish { .. })
    }

    pub fn is_start_automatic(&self) -> bool {
        matches!(self, Self::StartAutomatic { .. })
    }
}

pub struct RecordingOps {
    pub calls: Vec<OpsCall>,
    /// Run length for every started process.
    pub duration_ms: i64,
    /// Publish `workstation_state_changed` after each successful start.
    pub republish_on_start: bool,
    /// Publish `workstation_state_changed` after each successful finish.
    pub republish_on_finish: bool,
    /// Return `Ok` from starts without recording a run.
    pub forget_starts: bool,
    /// Processes whose start is refused.
    pub refuse_start: HashSet<ProcessId>,
    /// Processes whose finish is refused.
    pub refuse_finish: HashSet<ProcessId>,
    /// Starts that replaced a run of the same type still in flight.
    pub overlapping_starts: usize,
}

impl Default for RecordingOps {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            duration_ms: 1000,
            republish_on_start: false,
            republish_on_finish: false,
            forget_starts: false,
            refuse_start: HashSet::new(),
            refuse_finish: HashSet::new(),
            overlapping_starts: 0,
        }
    }
}

impl RecordingOps {
    pub fn automatic_starts(&self) -> Vec<&OpsCall> {
        self.calls.iter().filter(|c| c.is_start_automatic()).collect()
    }

    pub fn manual_starts(&self) -> Vec<&OpsCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, OpsCall::StartManual { .. }))
            .collect()
    }

    pub fn finishes(&self) -> Vec<&OpsCall> {
        self.calls.iter().filter(|c| c.is_finish()).collect()
    }

    fn record_start(
        &mut self,
        ctx: &mut OpsContext<'_>,
        workstation: EntityId,
        process: &Process,
        now: GameTime,
    ) -> Result<(), OpsError> {
        if self.refuse_start.contains(&process.id) {
            return Err(OpsError::new(format!("start of {} refused", process.id)));
        }
        if !self.forget_starts {
            let finish_at = now.after_ms(self.duration_ms);
            let run = ProcessRun::new(process.id.clone(), finish_at);
            match ctx.store.processing_state_mut(workstation) {
                Some(state) => {
                    if state.insert(process.process_type.clone(), run).is_some() {
                        self.overlapping_starts += 1;
                    }
                }
                None => {
                    let state = ProcessingState::new().with(process.process_type.clone(), run);
                    ctx.store.insert_processing_state(workstation, state);
                }
            }
            ctx.timers
                .schedule(workstation, WORKSTATION_PROCESSING, finish_at);
        }
        if self.republish_on_start {
            ctx.events.workstation_state_changed(workstation);
        }
        Ok(())
    }
}

impl ProcessOps for RecordingOps {
    fn start_automatic(
        &mut self,
        ctx: &mut OpsContext<'_>,
        workstation: EntityId,
        process: &Process,
        now: GameTime,
    ) -> Result<(), OpsError> {
        self.calls.push(OpsCall::StartAutomatic {
            workstation,
            process: process.id.clone(),
            now,
        });
        self.record_start(ctx, workstation, process, now)
    }

    fn start_manual(
        &mut self,
        ctx: &mut OpsContext<'_>,
        instigator: EntityId,
        workstation: EntityId,
        process: &Process,
        _request: &ProcessRequest,
        now: GameTime,
    ) -> Result<(), OpsError> {
        self.calls.push(OpsCall::StartManual {
            instigator,
            workstation,
            process: process.id.clone(),
            now,
        });
        self.record_start(ctx, workstation, process, now)
    }

    fn finish(
        &mut self,
        ctx: &mut OpsContext<'_>,
        instigator: EntityId,
        workstation: EntityId,
        process: &Process,
    ) -> Result<(), OpsError> {
        self.calls.push(OpsCall::Finish {
            instigator,
            workstation,
            process: process.id.clone(),
        });
        if self.refuse_finish.contains(&process.id) {
            return Err(OpsError::new(format!("finish of {} refused", process.id)));
        }
        let emptied = match ctx.store.processing_state_mut(workstation) {
            Some(state) => {
                state.remove(process.process_type.as_str());
                state.is_empty()
            }
            None => false,
        };
        if emptied {
            ctx.store.remove_processing_state(workstation);
        }
        if self.republish_on_finish {
            ctx.events.workstation_state_changed(workstation);
        }
        Ok(())
    }
}
