//! Test utilities and mock collaborators for Workshop development.
//!
//! Provides in-memory implementations of the collaborator traits
//! ([`EntityStore`], [`ProcessRegistry`], [`DelayedActions`],
//! [`GameClock`]) and a [`MockWorld`] that bundles them with a
//! [`RecordingOps`] into the [`Services`] the scheduler expects.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{OpsCall, RecordingOps};

use std::collections::HashMap;

use workshop_core::{
    DelayedActions, EntityId, EntityStore, GameClock, GameTime, Process, ProcessId, ProcessList,
    ProcessRegistry, ProcessingState, Services, TypeSet, WorkstationDescriptor,
};

#[derive(Default)]
struct MockEntity {
    descriptor: Option<WorkstationDescriptor>,
    processing: Option<ProcessingState>,
}

/// Generational in-memory entity store.
///
/// Destroyed slots are recycled with a bumped generation, so handles to
/// destroyed entities stay stale forever.
#[derive(Default)]
pub struct MockStore {
    entities: HashMap<EntityId, MockEntity>,
    generations: Vec<u32>,
    free: Vec<u32>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bare entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => EntityId::new(index, self.generations[index as usize]),
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                EntityId::new(index, 0)
            }
        };
        self.entities.insert(id, MockEntity::default());
        id
    }

    /// Create an entity carrying `descriptor`.
    pub fn spawn_workstation(&mut self, descriptor: WorkstationDescriptor) -> EntityId {
        let id = self.spawn();
        self.set_descriptor(id, descriptor);
        id
    }

    /// Destroy `id`, invalidating every handle to it.
    pub fn destroy(&mut self, id: EntityId) {
        if self.entities.remove(&id).is_some() {
            self.generations[id.index as usize] += 1;
            self.free.push(id.index);
        }
    }

    pub fn set_descriptor(&mut self, id: EntityId, descriptor: WorkstationDescriptor) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.descriptor = Some(descriptor);
        }
    }

    pub fn remove_descriptor(&mut self, id: EntityId) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.descriptor = None;
        }
    }

    pub fn set_processing_state(&mut self, id: EntityId, state: ProcessingState) {
        self.insert_processing_state(id, state);
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityStore for MockStore {
    fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn descriptor(&self, entity: EntityId) -> Option<&WorkstationDescriptor> {
        self.entities.get(&entity)?.descriptor.as_ref()
    }

    fn processing_state(&self, entity: EntityId) -> Option<&ProcessingState> {
        self.entities.get(&entity)?.processing.as_ref()
    }

    fn processing_state_mut(&mut self, entity: EntityId) -> Option<&mut ProcessingState> {
        self.entities.get_mut(&entity)?.processing.as_mut()
    }

    fn insert_processing_state(&mut self, entity: EntityId, state: ProcessingState) -> bool {
        match self.entities.get_mut(&entity) {
            Some(e) => {
                e.processing = Some(state);
                true
            }
            None => false,
        }
    }

    fn remove_processing_state(&mut self, entity: EntityId) -> Option<ProcessingState> {
        self.entities.get_mut(&entity)?.processing.take()
    }
}

/// Registry backed by a `Vec<Process>`, answering in registration order.
///
/// Counts lookups so tests can assert that a code path never touched it.
#[derive(Default)]
pub struct MockRegistry {
    processes: Vec<Process>,
    lookups: std::cell::Cell<usize>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, process: Process) {
        self.processes.push(process);
    }

    /// Remove the process with `id`, as if it were deregistered.
    pub fn deregister(&mut self, id: &str) {
        self.processes.retain(|p| p.id.as_str() != id);
    }

    /// Total calls to either lookup method.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl ProcessRegistry for MockRegistry {
    fn processes_with_types(&self, types: &TypeSet) -> ProcessList {
        self.lookups.set(self.lookups.get() + 1);
        self.processes
            .iter()
            .filter(|p| types.contains(&p.process_type))
            .cloned()
            .collect()
    }

    fn process_by_id(&self, types: &TypeSet, id: &ProcessId) -> Option<Process> {
        self.lookups.set(self.lookups.get() + 1);
        self.processes
            .iter()
            .find(|p| &p.id == id && types.contains(&p.process_type))
            .cloned()
    }
}

/// Timer service that records every schedule request.
#[derive(Default)]
pub struct RecordingTimers {
    pub scheduled: Vec<(EntityId, String, GameTime)>,
}

impl DelayedActions for RecordingTimers {
    fn schedule(&mut self, entity: EntityId, action_id: &str, due_at: GameTime) {
        self.scheduled.push((entity, action_id.to_string(), due_at));
    }
}

/// Clock that returns whatever the test last set.
#[derive(Default)]
pub struct MockClock {
    pub now: GameTime,
}

impl GameClock for MockClock {
    fn now(&self) -> GameTime {
        self.now
    }
}

/// All mock collaborators in one place.
///
/// Fields are public so tests can arrange state directly and inspect
/// the recorded calls afterwards.
#[derive(Default)]
pub struct MockWorld {
    pub store: MockStore,
    pub registry: MockRegistry,
    pub ops: RecordingOps,
    pub timers: RecordingTimers,
    pub clock: MockClock,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow every collaborator as a [`Services`] bundle.
    pub fn services(&mut self) -> Services<'_> {
        Services {
            store: &mut self.store,
            registry: &self.registry,
            ops: &mut self.ops,
            timers: &mut self.timers,
            clock: &self.clock,
        }
    }

    /// Set the clock.
    pub fn set_now(&mut self, ms: i64) {
        self.clock.now = GameTime(ms);
    }

    /// Register `id` with type `process_type`.
    pub fn register(&mut self, id: &str, process_type: &str) {
        self.registry.register(Process::new(id, process_type));
    }

    /// Running types on `ws`, in state order.
    pub fn running(&self, ws: EntityId) -> Vec<String> {
        self.store
            .processing_state(ws)
            .map(|s| s.running_types().map(|t| t.to_string()).collect())
            .unwrap_or_default()
    }
}
