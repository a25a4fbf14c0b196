//! FIFO of workstations awaiting automatic-process evaluation.
//!
//! [`PendingQueue`] is strictly first-in first-out. By default it keeps
//! duplicates: the drain loop re-reads the latest workstation state on
//! every pop, so a redundant entry costs one evaluation and starts
//! nothing new. With deduplication enabled, a workstation that is
//! already waiting is not appended again; handles are generational, so
//! a set can hold them safely even while their entity is destroyed.

use std::collections::VecDeque;

use indexmap::IndexSet;
use workshop_core::EntityId;

/// Pending workstation checks.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<EntityId>,
    /// Shadow of `entries` when deduplicating; empty otherwise.
    queued: IndexSet<EntityId>,
    dedup: bool,
}

impl PendingQueue {
    /// An empty queue that keeps duplicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty queue that skips workstations already waiting.
    pub fn deduplicating() -> Self {
        Self {
            dedup: true,
            ..Self::default()
        }
    }

    /// Append `workstation`.
    ///
    /// Returns `false` if deduplication skipped it because it is
    /// already queued.
    pub fn push_back(&mut self, workstation: EntityId) -> bool {
        if self.dedup && !self.queued.insert(workstation) {
            return false;
        }
        self.entries.push_back(workstation);
        true
    }

    /// Remove and return the oldest entry.
    pub fn pop_front(&mut self) -> Option<EntityId> {
        let workstation = self.entries.pop_front()?;
        if self.dedup {
            self.queued.swap_remove(&workstation);
        }
        Some(workstation)
    }

    /// Whether `workstation` is waiting.
    pub fn contains(&self, workstation: EntityId) -> bool {
        if self.dedup {
            self.queued.contains(&workstation)
        } else {
            self.entries.contains(&workstation)
        }
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this queue deduplicates on enqueue.
    pub fn is_deduplicating(&self) -> bool {
        self.dedup
    }

    /// Queued entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().copied()
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(i: u32) -> EntityId {
        EntityId::new(i, 0)
    }

    #[test]
    fn fifo_order() {
        let mut q = PendingQueue::new();
        q.push_back(ws(1));
        q.push_back(ws(2));
        q.push_back(ws(3));
        assert_eq!(q.pop_front(), Some(ws(1)));
        assert_eq!(q.pop_front(), Some(ws(2)));
        assert_eq!(q.pop_front(), Some(ws(3)));
        assert_eq!(q.pop_front(), None);
    }

    #[test]
    fn duplicates_kept_by_default() {
        let mut q = PendingQueue::new();
        assert!(q.push_back(ws(1)));
        assert!(q.push_back(ws(1)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn dedup_skips_waiting_entry() {
        let mut q = PendingQueue::deduplicating();
        assert!(q.push_back(ws(1)));
        assert!(!q.push_back(ws(1)));
        assert!(q.push_back(ws(2)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop_front(), Some(ws(1)));
        // Once popped it may be queued again.
        assert!(q.push_back(ws(1)));
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![ws(2), ws(1)]);
    }

    #[test]
    fn dedup_distinguishes_generations() {
        let mut q = PendingQueue::deduplicating();
        assert!(q.push_back(EntityId::new(4, 0)));
        assert!(q.push_back(EntityId::new(4, 1)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn clear_resets_shadow() {
        let mut q = PendingQueue::deduplicating();
        q.push_back(ws(1));
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(ws(1)));
        assert!(q.push_back(ws(1)));
    }

    // ── proptest ───────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(u32),
            Pop,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![(0u32..8).prop_map(Op::Push), Just(Op::Pop)]
        }

        proptest! {
            #[test]
            fn plain_queue_matches_vecdeque(ops in prop::collection::vec(arb_op(), 0..128)) {
                let mut q = PendingQueue::new();
                let mut model = VecDeque::new();
                for op in ops {
                    match op {
                        Op::Push(i) => {
                            q.push_back(ws(i));
                            model.push_back(ws(i));
                        }
                        Op::Pop => {
                            prop_assert_eq!(q.pop_front(), model.pop_front());
                        }
                    }
                }
                prop_assert_eq!(q.iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
            }

            #[test]
            fn dedup_queue_never_holds_duplicates(ops in prop::collection::vec(arb_op(), 0..128)) {
                let mut q = PendingQueue::deduplicating();
                for op in ops {
                    match op {
                        Op::Push(i) => { q.push_back(ws(i)); }
                        Op::Pop => { q.pop_front(); }
                    }
                    let entries: Vec<_> = q.iter().collect();
                    let unique: IndexSet<_> = entries.iter().copied().collect();
                    prop_assert_eq!(entries.len(), unique.len());
                    for e in &entries {
                        prop_assert!(q.contains(*e));
                    }
                }
            }
        }
    }
}
