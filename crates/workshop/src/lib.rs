//! Workshop: authoritative process scheduling for crafting workstations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Workshop sub-crates. For most hosts, adding `workshop` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use workshop::prelude::*;
//! use workshop_test_utils::MockWorld;
//!
//! // In-memory collaborators; a real host implements the traits in
//! // `workshop::types` over its own entity store and timers.
//! let mut world = MockWorld::new();
//! world.set_now(1_000);
//! world.register("smelt_iron", "Smelt");
//! let furnace = world
//!     .store
//!     .spawn_workstation(WorkstationDescriptor::new().with("Smelt", true));
//!
//! let mut scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
//! scheduler.on_added(furnace, &mut world.services()).unwrap();
//! assert_eq!(world.running(furnace), vec!["Smelt"]);
//!
//! // The run finishes one second later and the automatic type restarts.
//! world.set_now(2_000);
//! let outcome = scheduler
//!     .on_delayed_action(furnace, WORKSTATION_PROCESSING, &mut world.services())
//!     .unwrap();
//! assert!(matches!(outcome, CompletionOutcome::Finalized { finished: 1, .. }));
//! assert_eq!(world.ops.automatic_starts().len(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `workshop-core` | IDs, components, triggers, collaborator traits |
//! | [`sched`] | `workshop-sched` | Scheduler, queue, guard, config, trigger bus |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and collaborator traits (`workshop-core`).
///
/// Hosts implement [`types::EntityStore`], [`types::ProcessRegistry`],
/// [`types::ProcessOps`], [`types::DelayedActions`] and
/// [`types::GameClock`] and hand them to the scheduler as
/// [`types::Services`].
pub use workshop_core as types;

/// The scheduler and its supporting pieces (`workshop-sched`).
///
/// [`sched::Scheduler`] owns the pending queue and re-entrancy guard;
/// [`sched::trigger_bus`] connects producers on other threads to it.
pub use workshop_sched as sched;

/// Common imports for typical Workshop usage.
///
/// ```rust
/// use workshop::prelude::*;
/// ```
pub mod prelude {
    // Identifiers and components
    pub use workshop_core::{
        EntityId, GameTime, Process, ProcessId, ProcessRun, ProcessType, ProcessingState,
        WorkstationDescriptor,
    };

    // Triggers
    pub use workshop_core::{ProcessRequest, Trigger, WORKSTATION_PROCESSING};

    // Collaborator traits
    pub use workshop_core::{
        DelayedActions, EntityStore, EventSink, GameClock, OpsContext, ProcessOps,
        ProcessRegistry, Services,
    };

    // Errors
    pub use workshop_core::{DropReason, OpsError};
    pub use workshop_sched::{BusError, ConfigError, SchedulerError};

    // Scheduler
    pub use workshop_sched::{
        trigger_bus, CompletionOutcome, Dispatched, DrainReport, ManualOutcome, Scheduler,
        SchedulerConfig, SchedulerMetrics, TriggerReceiver, TriggerSender,
    };
}
