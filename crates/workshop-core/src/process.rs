//! Process descriptors handed out by the process registry.

use smallvec::SmallVec;

use crate::id::{ProcessId, ProcessType};

/// A registered process definition.
///
/// The registry owns the full definition; the scheduler only needs the
/// id to report and the type to check against a workstation's tables.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Process {
    /// Registry id.
    pub id: ProcessId,
    /// Category this process belongs to.
    pub process_type: ProcessType,
}

impl Process {
    /// Create a process descriptor.
    pub fn new(id: impl Into<ProcessId>, process_type: impl Into<ProcessType>) -> Self {
        Self {
            id: id.into(),
            process_type: process_type.into(),
        }
    }
}

/// Processes returned by a registry listing.
///
/// Listings are usually a handful of entries, so up to four stay inline.
pub type ProcessList = SmallVec<[Process; 4]>;
