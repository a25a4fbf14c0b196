//! Authoritative workstation process scheduler.
//!
//! [`Scheduler`] decides which automatic processes a workstation may
//! start, finalizes timed runs when their completion timer fires, and
//! validates user-initiated starts. It is driven by four triggers and
//! runs entirely on the host's tick thread:
//!
//! ```text
//! on_added / on_state_changed ──► PendingQueue ──► drain ──► ProcessOps::start_automatic
//! on_delayed_action ──► finalize due runs ──► PendingQueue ──► drain
//! on_process_request ──► validate ──► ProcessOps::start_manual
//! ```
//!
//! A [`ReentrancyGuard`] ensures at most one drain is active. Events that
//! process logic publishes while the guard is held only append to the
//! queue; the active drain picks them up before it returns.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bus;
mod completion;
pub mod config;
pub mod error;
pub mod guard;
mod manual;
pub mod metrics;
pub mod outcome;
pub mod queue;
pub mod scheduler;
pub mod selector;

pub use bus::{trigger_bus, BusError, TriggerReceiver, TriggerSender};
pub use config::{ConfigError, SchedulerConfig};
pub use error::SchedulerError;
pub use guard::ReentrancyGuard;
pub use metrics::SchedulerMetrics;
pub use outcome::{CompletionOutcome, Dispatched, DrainReport, ManualOutcome};
pub use queue::PendingQueue;
pub use scheduler::Scheduler;
pub use selector::{eligible_automatic_types, select_processes};
