//! The [`Scheduler`] and its drain loop.
//!
//! Added and state-changed triggers append the workstation to the
//! pending queue and, if no pass is active, take the guard and drain.
//! Each popped workstation is checked for existence and a descriptor,
//! its eligible automatic types are computed from the latest state, and
//! every matching process the registry offers is started.
//!
//! Process logic runs with an [`OpsContext`] whose event sink appends to
//! the queue directly. Because the guard is held for the whole call, a
//! republished state change never recurses into a second drain; the
//! active loop sees the new entry on a later iteration.

use tracing::{debug, trace, warn};
use workshop_core::{DropReason, EntityId, EventSink, OpsContext, Services, Trigger};

use crate::bus::TriggerReceiver;
use crate::config::{ConfigError, SchedulerConfig};
use crate::error::SchedulerError;
use crate::guard::ReentrancyGuard;
use crate::metrics::SchedulerMetrics;
use crate::outcome::{Dispatched, DrainReport};
use crate::queue::PendingQueue;
use crate::selector::{eligible_automatic_types, select_processes};

/// Authoritative process scheduler for workstation entities.
///
/// Owns only its bookkeeping: the pending queue, the re-entrancy guard,
/// configuration and metrics. All simulation state is reached through
/// the [`Services`] passed to each trigger method.
///
/// # Example
///
/// ```ignore
/// let mut scheduler = Scheduler::new(SchedulerConfig::default())?;
/// scheduler.on_added(workstation, &mut world.services())?;
/// // ...later, when the processing timer fires:
/// scheduler.on_delayed_action(workstation, WORKSTATION_PROCESSING, &mut world.services())?;
/// ```
#[derive(Debug)]
pub struct Scheduler {
    pub(crate) queue: PendingQueue,
    pub(crate) guard: ReentrancyGuard,
    pub(crate) config: SchedulerConfig,
    pub(crate) metrics: SchedulerMetrics,
}

impl Scheduler {
    /// Create a scheduler from a validated configuration.
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let queue = if config.dedup_pending {
            PendingQueue::deduplicating()
        } else {
            PendingQueue::new()
        };
        Ok(Self {
            queue,
            guard: ReentrancyGuard::new(),
            config,
            metrics: SchedulerMetrics::default(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.metrics
    }

    /// Workstations waiting for evaluation.
    pub fn pending(&self) -> &PendingQueue {
        &self.queue
    }

    /// Whether a scheduling pass is active.
    pub fn is_executing(&self) -> bool {
        self.guard.is_held()
    }

    /// A workstation descriptor was attached to a block entity.
    ///
    /// Returns the drain report, or `None` if a pass was already active
    /// and the workstation was only queued.
    #[tracing::instrument(level = "debug", skip(self, svc))]
    pub fn on_added(
        &mut self,
        workstation: EntityId,
        svc: &mut Services<'_>,
    ) -> Result<Option<DrainReport>, SchedulerError> {
        self.enqueue_and_drain(workstation, svc)
    }

    /// A workstation's processing inputs or state changed externally.
    #[tracing::instrument(level = "debug", skip(self, svc))]
    pub fn on_state_changed(
        &mut self,
        workstation: EntityId,
        svc: &mut Services<'_>,
    ) -> Result<Option<DrainReport>, SchedulerError> {
        self.enqueue_and_drain(workstation, svc)
    }

    /// Route `trigger` to its handler.
    pub fn dispatch(
        &mut self,
        trigger: Trigger,
        svc: &mut Services<'_>,
    ) -> Result<Dispatched, SchedulerError> {
        match trigger {
            Trigger::Added { workstation } => {
                self.on_added(workstation, svc).map(Dispatched::Evaluated)
            }
            Trigger::StateChanged { workstation } => self
                .on_state_changed(workstation, svc)
                .map(Dispatched::Evaluated),
            Trigger::DelayedAction {
                workstation,
                action_id,
            } => self
                .on_delayed_action(workstation, &action_id, svc)
                .map(Dispatched::Completion),
            Trigger::ProcessRequest {
                instigator,
                request,
            } => self
                .on_process_request(instigator, &request, svc)
                .map(Dispatched::Manual),
        }
    }

    /// Dispatch every trigger currently buffered on `triggers`, in
    /// arrival order. Returns how many were handled.
    ///
    /// Stops at the first error; later triggers stay buffered.
    pub fn pump(
        &mut self,
        triggers: &TriggerReceiver,
        svc: &mut Services<'_>,
    ) -> Result<usize, SchedulerError> {
        let mut handled = 0;
        while let Some(trigger) = triggers.try_next() {
            self.dispatch(trigger, svc)?;
            handled += 1;
        }
        Ok(handled)
    }

    fn enqueue_and_drain(
        &mut self,
        workstation: EntityId,
        svc: &mut Services<'_>,
    ) -> Result<Option<DrainReport>, SchedulerError> {
        let deferred = self.guard.is_held();
        enqueue(&mut self.queue, &mut self.metrics, workstation, deferred);
        if !self.guard.enter() {
            return Ok(None);
        }
        let result = self.drain(svc);
        self.guard.exit();
        result.map(Some)
    }

    /// Pop and evaluate workstations until the queue is empty.
    ///
    /// The caller must hold the guard.
    pub(crate) fn drain(&mut self, svc: &mut Services<'_>) -> Result<DrainReport, SchedulerError> {
        debug_assert!(self.guard.is_held(), "drain without holding the guard");
        let Self {
            queue,
            metrics,
            config,
            ..
        } = self;
        metrics.drains += 1;

        let mut report = DrainReport::default();
        let mut popped = 0usize;
        while !queue.is_empty() {
            if popped == config.drain_budget {
                warn!(
                    budget = config.drain_budget,
                    remaining = queue.len(),
                    "drain budget exhausted; process logic is likely republishing without starting"
                );
                return Err(SchedulerError::DrainBudgetExceeded {
                    budget: config.drain_budget,
                });
            }
            popped += 1;
            let Some(workstation) = queue.pop_front() else {
                break;
            };
            evaluate(workstation, queue, metrics, &mut report, svc)?;
        }

        debug!(
            evaluated = report.evaluated,
            stale = report.stale,
            started = report.started,
            "drain complete"
        );
        Ok(report)
    }
}

/// Evaluate one popped workstation and start its eligible processes.
fn evaluate(
    workstation: EntityId,
    queue: &mut PendingQueue,
    metrics: &mut SchedulerMetrics,
    report: &mut DrainReport,
    svc: &mut Services<'_>,
) -> Result<(), SchedulerError> {
    if !svc.store.exists(workstation) {
        trace!(%workstation, reason = %DropReason::StaleEntity, "discarding queue entry");
        report.stale += 1;
        metrics.stale_discarded += 1;
        return Ok(());
    }
    let Some(descriptor) = svc.store.descriptor(workstation) else {
        trace!(%workstation, reason = %DropReason::MissingDescriptor, "discarding queue entry");
        return Ok(());
    };
    let eligible = eligible_automatic_types(descriptor, svc.store.processing_state(workstation));
    report.evaluated += 1;
    metrics.workstations_evaluated += 1;
    if eligible.is_empty() {
        return Ok(());
    }

    let processes = select_processes(svc.registry, &eligible);
    let now = svc.clock.now();
    for process in &processes {
        // One run per type: a second listing of an already-started type is skipped.
        let busy = svc
            .store
            .processing_state(workstation)
            .is_some_and(|s| s.is_running(process.process_type.as_str()));
        if busy {
            continue;
        }
        let mut events = DeferredEvents {
            queue: &mut *queue,
            metrics: &mut *metrics,
        };
        let mut ctx = OpsContext {
            store: &mut *svc.store,
            timers: &mut *svc.timers,
            events: &mut events,
        };
        svc.ops
            .start_automatic(&mut ctx, workstation, process, now)
            .map_err(|source| SchedulerError::StartFailure {
                workstation,
                process: process.id.clone(),
                source,
            })?;
        debug!(%workstation, process = %process.id, %now, "automatic start");
        report.started += 1;
        metrics.automatic_starts += 1;
    }
    Ok(())
}

/// Append `workstation` to the queue, counting deferrals and dedup skips.
pub(crate) fn enqueue(
    queue: &mut PendingQueue,
    metrics: &mut SchedulerMetrics,
    workstation: EntityId,
    deferred: bool,
) {
    if !queue.push_back(workstation) {
        trace!(%workstation, "already queued");
        metrics.deduplicated_enqueues += 1;
        return;
    }
    if deferred {
        trace!(%workstation, "pass active; queued for the running drain");
        metrics.deferred_enqueues += 1;
    }
}

/// Event sink handed to process logic while the guard is held.
///
/// State changes only append; the holder drains them.
pub(crate) struct DeferredEvents<'a> {
    pub(crate) queue: &'a mut PendingQueue,
    pub(crate) metrics: &'a mut SchedulerMetrics,
}

impl EventSink for DeferredEvents<'_> {
    fn workstation_state_changed(&mut self, workstation: EntityId) {
        enqueue(self.queue, self.metrics, workstation, true);
    }
}
