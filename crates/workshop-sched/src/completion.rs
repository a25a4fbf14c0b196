//! Completion of timed runs when the processing timer fires.
//!
//! Due runs are collected from the processing state before any of them
//! is finalized, so `ProcessOps::finish` is free to mutate or remove the
//! component while the list is applied. The workstation is re-queued only
//! after every due run has been handled, which guarantees completions are
//! finalized before the next automatic-start evaluation.

use smallvec::SmallVec;
use tracing::{debug, warn};
use workshop_core::{
    DropReason, EntityId, GameTime, OpsContext, ProcessRun, ProcessingState, Services, TypeSet,
    WORKSTATION_PROCESSING,
};

use crate::error::SchedulerError;
use crate::outcome::CompletionOutcome;
use crate::scheduler::{enqueue, DeferredEvents, Scheduler};

/// Runs in `state` whose finish time is at or before `now`, in state order.
fn due_runs(state: &ProcessingState, now: GameTime) -> SmallVec<[ProcessRun; 4]> {
    state
        .iter()
        .map(|(_, run)| run)
        .filter(|run| run.is_due(now))
        .cloned()
        .collect()
}

impl Scheduler {
    /// A delayed action fired on `workstation`.
    ///
    /// Only [`WORKSTATION_PROCESSING`] actions on workstations carrying
    /// both a descriptor and a processing state are handled; anything
    /// else is ignored without touching the queue. Every due run is
    /// passed to `ProcessOps::finish` exactly once, then the workstation
    /// is queued and drained.
    ///
    /// A due run whose process id is no longer registered is skipped and
    /// stays in the processing state.
    #[tracing::instrument(level = "debug", skip(self, svc))]
    pub fn on_delayed_action(
        &mut self,
        workstation: EntityId,
        action_id: &str,
        svc: &mut Services<'_>,
    ) -> Result<CompletionOutcome, SchedulerError> {
        if action_id != WORKSTATION_PROCESSING {
            return Ok(self.ignore_timer(DropReason::UnrelatedAction));
        }
        if !svc.store.exists(workstation) {
            return Ok(self.ignore_timer(DropReason::StaleEntity));
        }
        let Some(descriptor) = svc.store.descriptor(workstation) else {
            return Ok(self.ignore_timer(DropReason::MissingDescriptor));
        };
        let Some(state) = svc.store.processing_state(workstation) else {
            return Ok(self.ignore_timer(DropReason::MissingProcessingState));
        };
        let supported = descriptor.supported_types();
        let due = due_runs(state, svc.clock.now());

        // Taken unconditionally; the previous holder, if any, keeps it.
        let was_held = self.guard.force();
        let result = self.finalize_and_drain(workstation, &supported, &due, svc);
        if !was_held {
            self.guard.exit();
        }
        result
    }

    fn ignore_timer(&mut self, reason: DropReason) -> CompletionOutcome {
        debug!(%reason, "ignoring delayed action");
        self.metrics.ignored_timers += 1;
        CompletionOutcome::Ignored(reason)
    }

    fn finalize_and_drain(
        &mut self,
        workstation: EntityId,
        supported: &TypeSet,
        due: &[ProcessRun],
        svc: &mut Services<'_>,
    ) -> Result<CompletionOutcome, SchedulerError> {
        let mut finished = 0;
        let mut skipped = 0;
        for run in due {
            let Some(process) = svc.registry.process_by_id(supported, &run.process_id) else {
                warn!(
                    %workstation,
                    process = %run.process_id,
                    "due run references an unregistered process; leaving it in place"
                );
                skipped += 1;
                self.metrics.unknown_finish_skips += 1;
                continue;
            };
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
                .finish(&mut ctx, workstation, workstation, &process)
                .map_err(|source| SchedulerError::FinishFailure {
                    workstation,
                    process: process.id.clone(),
                    source,
                })?;
            debug!(%workstation, process = %process.id, "run finished");
            finished += 1;
            self.metrics.finishes += 1;
        }

        enqueue(&mut self.queue, &mut self.metrics, workstation, false);
        let drain = self.drain(svc)?;
        Ok(CompletionOutcome::Finalized {
            finished,
            skipped,
            drain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use workshop_core::WorkstationDescriptor;
    use workshop_test_utils::MockWorld;

    #[test]
    fn due_runs_boundary_is_inclusive() {
        let state = ProcessingState::new()
            .with("A", ProcessRun::new("A1", GameTime(100)))
            .with("B", ProcessRun::new("B1", GameTime(101)));
        let due = due_runs(&state, GameTime(100));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].process_id.as_str(), "A1");
    }

    #[test]
    fn unregistered_process_is_skipped_and_kept() {
        let mut world = MockWorld::new();
        world.set_now(2000);
        let ws = world
            .store
            .spawn_workstation(WorkstationDescriptor::new().with("A", false));
        world.store.set_processing_state(
            ws,
            ProcessingState::new().with("A", ProcessRun::new("Gone", GameTime(1000))),
        );
        let mut s = Scheduler::new(SchedulerConfig::default()).unwrap();

        let outcome = s
            .on_delayed_action(ws, WORKSTATION_PROCESSING, &mut world.services())
            .unwrap();

        match outcome {
            CompletionOutcome::Finalized {
                finished, skipped, ..
            } => {
                assert_eq!(finished, 0);
                assert_eq!(skipped, 1);
            }
            other => panic!("expected Finalized, got {other:?}"),
        }
        assert!(world.ops.finishes().is_empty());
        assert_eq!(world.running(ws), vec!["A"]);
        assert_eq!(s.metrics().unknown_finish_skips, 1);
    }

    #[test]
    fn timer_without_processing_state_is_ignored() {
        let mut world = MockWorld::new();
        let ws = world
            .store
            .spawn_workstation(WorkstationDescriptor::new().with("A", true));
        let mut s = Scheduler::new(SchedulerConfig::default()).unwrap();

        let outcome = s
            .on_delayed_action(ws, WORKSTATION_PROCESSING, &mut world.services())
            .unwrap();

        assert_eq!(
            outcome,
            CompletionOutcome::Ignored(DropReason::MissingProcessingState)
        );
        assert_eq!(s.metrics().drains, 0);
        assert!(world.ops.calls.is_empty());
    }

    #[test]
    fn finish_failure_releases_guard() {
        let mut world = MockWorld::new();
        world.set_now(5000);
        world.register("A1", "A");
        world.ops.refuse_finish.insert("A1".into());
        let ws = world
            .store
            .spawn_workstation(WorkstationDescriptor::new().with("A", true));
        world.store.set_processing_state(
            ws,
            ProcessingState::new().with("A", ProcessRun::new("A1", GameTime(4000))),
        );
        let mut s = Scheduler::new(SchedulerConfig::default()).unwrap();

        let err = s
            .on_delayed_action(ws, WORKSTATION_PROCESSING, &mut world.services())
            .unwrap_err();

        assert!(matches!(err, SchedulerError::FinishFailure { .. }));
        assert!(!s.is_executing());
        assert!(s.pending().is_empty());
    }
}
