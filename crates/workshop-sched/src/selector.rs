//! Automatic-process selection.
//!
//! [`eligible_automatic_types`] is pure: a workstation may automatically
//! start a type if the type is declared automatic and nothing of that
//! type is already running. [`select_processes`] asks the registry for
//! matching processes and drops anything outside the eligible set, so a
//! registry that over-answers cannot widen the selection.

use workshop_core::{ProcessList, ProcessRegistry, ProcessingState, TypeSet, WorkstationDescriptor};

/// Automatic types on `descriptor` that are not currently running.
///
/// An absent `state` is equivalent to an empty one.
pub fn eligible_automatic_types(
    descriptor: &WorkstationDescriptor,
    state: Option<&ProcessingState>,
) -> TypeSet {
    descriptor
        .automatic_types()
        .filter(|t| !state.is_some_and(|s| s.is_running(t.as_str())))
        .cloned()
        .collect()
}

/// Processes the registry offers for `eligible`, restricted to it.
///
/// Registry order is preserved.
pub fn select_processes(registry: &dyn ProcessRegistry, eligible: &TypeSet) -> ProcessList {
    let mut processes = registry.processes_with_types(eligible);
    processes.retain(|p| eligible.contains(&p.process_type));
    processes
}
