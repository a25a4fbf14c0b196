//! Workstation components: the declared process table and the
//! in-flight processing state.

use indexmap::{IndexMap, IndexSet};

use crate::id::{GameTime, ProcessId, ProcessType};

/// Ordered set of process type names.
///
/// Iteration order is insertion order, which keeps tests deterministic.
/// The scheduler never relies on that order for correctness.
pub type TypeSet = IndexSet<ProcessType>;

/// Declares which process types a workstation supports.
///
/// Each supported type maps to an `automatic` flag: `true` means the
/// scheduler may start processes of that type without a user request.
///
/// # Examples
///
/// ```
/// use workshop_core::WorkstationDescriptor;
///
/// let desc = WorkstationDescriptor::new()
///     .with("Smelt", true)
///     .with("Carve", false);
///
/// assert!(desc.supports("Carve"));
/// assert_eq!(desc.is_automatic("Smelt"), Some(true));
/// assert_eq!(desc.automatic_types().count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkstationDescriptor {
    supported: IndexMap<ProcessType, bool>,
}

impl WorkstationDescriptor {
    /// An empty descriptor supporting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a supported type.
    pub fn with(mut self, process_type: impl Into<ProcessType>, automatic: bool) -> Self {
        self.insert(process_type, automatic);
        self
    }

    /// Declare support for `process_type`, replacing any earlier flag.
    pub fn insert(&mut self, process_type: impl Into<ProcessType>, automatic: bool) {
        self.supported.insert(process_type.into(), automatic);
    }

    /// Whether `process_type` is supported at all.
    pub fn supports(&self, process_type: &str) -> bool {
        self.supported.contains_key(process_type)
    }

    /// The automatic flag for `process_type`, or `None` if unsupported.
    pub fn is_automatic(&self, process_type: &str) -> Option<bool> {
        self.supported.get(process_type).copied()
    }

    /// All supported types, automatic or not.
    pub fn supported_types(&self) -> TypeSet {
        self.supported.keys().cloned().collect()
    }

    /// Supported types whose automatic flag is set.
    pub fn automatic_types(&self) -> impl Iterator<Item = &ProcessType> {
        self.supported
            .iter()
            .filter(|(_, &automatic)| automatic)
            .map(|(t, _)| t)
    }

    /// Iterate `(type, automatic)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ProcessType, bool)> {
        self.supported.iter().map(|(t, &a)| (t, a))
    }

    /// Number of supported types.
    pub fn len(&self) -> usize {
        self.supported.len()
    }

    /// Whether no types are supported.
    pub fn is_empty(&self) -> bool {
        self.supported.is_empty()
    }
}

impl<T: Into<ProcessType>> FromIterator<(T, bool)> for WorkstationDescriptor {
    fn from_iter<I: IntoIterator<Item = (T, bool)>>(iter: I) -> Self {
        Self {
            supported: iter.into_iter().map(|(t, a)| (t.into(), a)).collect(),
        }
    }
}

/// A process currently executing on a workstation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRun {
    /// Registry id of the running process.
    pub process_id: ProcessId,
    /// Game time at which the run is due for completion.
    pub finish_at: GameTime,
}

impl ProcessRun {
    /// Create a run for `process_id` finishing at `finish_at`.
    pub fn new(process_id: impl Into<ProcessId>, finish_at: GameTime) -> Self {
        Self {
            process_id: process_id.into(),
            finish_at,
        }
    }

    /// Whether this run is due at `now` (`finish_at <= now`).
    pub fn is_due(&self, now: GameTime) -> bool {
        self.finish_at <= now
    }
}

/// In-flight runs on a workstation, keyed by process type.
///
/// Created by `ProcessOps` when the first process starts and removed
/// when the last one finishes. An absent component is equivalent to an
/// empty one. A type is either idle or has exactly one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessingState {
    running: IndexMap<ProcessType, ProcessRun>,
}

impl ProcessingState {
    /// An empty state with nothing running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a run.
    pub fn with(mut self, process_type: impl Into<ProcessType>, run: ProcessRun) -> Self {
        self.insert(process_type, run);
        self
    }

    /// Record `run` for `process_type`, returning the run it replaced.
    pub fn insert(
        &mut self,
        process_type: impl Into<ProcessType>,
        run: ProcessRun,
    ) -> Option<ProcessRun> {
        self.running.insert(process_type.into(), run)
    }

    /// Remove the run for `process_type`.
    pub fn remove(&mut self, process_type: &str) -> Option<ProcessRun> {
        self.running.shift_remove(process_type)
    }

    /// Whether a run of `process_type` is in flight.
    pub fn is_running(&self, process_type: &str) -> bool {
        self.running.contains_key(process_type)
    }

    /// The run for `process_type`, if any.
    pub fn get(&self, process_type: &str) -> Option<&ProcessRun> {
        self.running.get(process_type)
    }

    /// Iterate `(type, run)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ProcessType, &ProcessRun)> {
        self.running.iter()
    }

    /// Types currently running.
    pub fn running_types(&self) -> impl Iterator<Item = &ProcessType> {
        self.running.keys()
    }

    /// Find the type whose run carries `process_id`.
    pub fn type_of(&self, process_id: &str) -> Option<&ProcessType> {
        self.running
            .iter()
            .find(|(_, run)| run.process_id.as_str() == process_id)
            .map(|(t, _)| t)
    }

    /// Number of runs in flight.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether nothing is running.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_automatic_filter() {
        let desc: WorkstationDescriptor = [("A", true), ("B", false), ("C", true)]
            .into_iter()
            .collect();
        let auto: Vec<&str> = desc.automatic_types().map(|t| t.as_str()).collect();
        assert_eq!(auto, vec!["A", "C"]);
        assert_eq!(desc.supported_types().len(), 3);
    }

    #[test]
    fn descriptor_insert_replaces_flag() {
        let mut desc = WorkstationDescriptor::new().with("A", true);
        desc.insert("A", false);
        assert_eq!(desc.len(), 1);
        assert_eq!(desc.is_automatic("A"), Some(false));
        assert_eq!(desc.is_automatic("Z"), None);
    }

    #[test]
    fn run_due_boundary_is_inclusive() {
        let run = ProcessRun::new("P", GameTime(100));
        assert!(!run.is_due(GameTime(99)));
        assert!(run.is_due(GameTime(100)));
        assert!(run.is_due(GameTime(101)));
    }

    #[test]
    fn state_one_run_per_type() {
        let mut state = ProcessingState::new();
        assert!(state.insert("A", ProcessRun::new("A1", GameTime(5))).is_none());
        let old = state.insert("A", ProcessRun::new("A2", GameTime(9)));
        assert_eq!(old.map(|r| r.process_id), Some(ProcessId::new("A1")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn state_remove_and_lookup() {
        let mut state = ProcessingState::new()
            .with("A", ProcessRun::new("A1", GameTime(5)))
            .with("B", ProcessRun::new("B1", GameTime(7)));
        assert_eq!(state.type_of("B1").map(|t| t.as_str()), Some("B"));
        assert!(state.remove("A").is_some());
        assert!(!state.is_running("A"));
        assert!(state.is_running("B"));
        assert!(state.remove("A").is_none());
    }
}
