//! Core types and traits for the Workshop process scheduler.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the scheduler and its hosts: entity and
//! process identifiers, workstation components, trigger events, error
//! types, and the collaborator traits the scheduler calls into.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod component;
pub mod error;
pub mod event;
pub mod id;
pub mod process;
pub mod traits;

pub use component::{ProcessRun, ProcessingState, TypeSet, WorkstationDescriptor};
pub use error::{DropReason, OpsError};
pub use event::{ProcessRequest, Trigger, WORKSTATION_PROCESSING};
pub use id::{EntityId, GameTime, ProcessId, ProcessType};
pub use process::{Process, ProcessList};
pub use traits::{
    DelayedActions, EntityStore, EventSink, GameClock, OpsContext, ProcessOps, ProcessRegistry,
    Services,
};
