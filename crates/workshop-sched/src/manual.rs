//! User-initiated process starts.

use tracing::debug;
use workshop_core::{DropReason, EntityId, OpsContext, Process, ProcessRequest, Services};

use crate::error::SchedulerError;
use crate::outcome::ManualOutcome;
use crate::scheduler::{DeferredEvents, Scheduler};

/// Resolve the requested process, or say why the request is dropped.
fn validate_request(svc: &Services<'_>, request: &ProcessRequest) -> Result<Process, DropReason> {
    let workstation = request.workstation;
    if !svc.store.exists(workstation) {
        return Err(DropReason::StaleEntity);
    }
    let descriptor = svc
        .store
        .descriptor(workstation)
        .ok_or(DropReason::MissingDescriptor)?;
    let process = svc
        .registry
        .process_by_id(&descriptor.supported_types(), &request.process_id)
        .ok_or(DropReason::UnknownProcessId)?;
    let busy = svc
        .store
        .processing_state(workstation)
        .is_some_and(|s| s.is_running(process.process_type.as_str()));
    if busy {
        return Err(DropReason::BusyType);
    }
    Ok(process)
}

impl Scheduler {
    /// `instigator` asked a workstation to run a specific process.
    ///
    /// The request is dropped if the workstation has no descriptor, the
    /// process is not registered for its supported types, or a run of the
    /// same type is already in flight. Otherwise `ProcessOps::start_manual`
    /// runs under the guard, and anything it queued is drained before the
    /// guard is released.
    #[tracing::instrument(
        level = "debug",
        skip(self, request, svc),
        fields(workstation = %request.workstation, process = %request.process_id)
    )]
    pub fn on_process_request(
        &mut self,
        instigator: EntityId,
        request: &ProcessRequest,
        svc: &mut Services<'_>,
    ) -> Result<ManualOutcome, SchedulerError> {
        let process = match validate_request(svc, request) {
            Ok(process) => process,
            Err(reason) => {
                debug!(%reason, "dropping manual request");
                self.metrics.manual_dropped += 1;
                return Ok(ManualOutcome::Dropped(reason));
            }
        };

        // The host bus delivers requests outside other handlers; if one
        // nests anyway, the outer holder drains.
        let acquired = self.guard.enter();
        debug_assert!(acquired, "manual request delivered inside a scheduling pass");
        let result = self.start_manual(instigator, request, &process, acquired, svc);
        if acquired {
            self.guard.exit();
        }
        result.map(|()| ManualOutcome::Started { process })
    }

    fn start_manual(
        &mut self,
        instigator: EntityId,
        request: &ProcessRequest,
        process: &Process,
        drain_after: bool,
        svc: &mut Services<'_>,
    ) -> Result<(), SchedulerError> {
        let workstation = request.workstation;
        let now = svc.clock.now();
        let mut events = DeferredEvents {
            queue: &mut self.queue,
            metrics: &mut self.metrics,
        };
        let mut ctx = OpsContext {
            store: &mut *svc.store,
            timers: &mut *svc.timers,
            events: &mut events,
        };
        svc.ops
            .start_manual(&mut ctx, instigator, workstation, process, request, now)
            .map_err(|source| SchedulerError::StartFailure {
                workstation,
                process: process.id.clone(),
                source,
            })?;
        debug!(%instigator, %now, "manual start");
        self.metrics.manual_starts += 1;

        if drain_after && !self.queue.is_empty() {
            self.drain(svc)?;
        }
        Ok(())
    }
}
