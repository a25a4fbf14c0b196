//! Strongly-typed identifiers and the [`GameTime`] clock value.

use std::borrow::Borrow;
use std::fmt;

/// Stable handle to an entity in the host's entity store.
///
/// Handles are generational: when a slot is recycled the generation is
/// bumped, so a handle to a destroyed entity never aliases its successor.
/// Equality and hashing depend only on `(index, generation)` and never
/// change across the entity's lifetime, which makes handles safe to keep
/// in sets while the entity is being destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    /// Slot index in the store.
    pub index: u32,
    /// Generation of the slot when this handle was issued.
    pub generation: u32,
}

impl EntityId {
    /// Create a handle from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Simulation time in milliseconds, supplied by the host clock.
///
/// Monotonically non-decreasing. Signed to match the host's 64-bit
/// game-time representation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameTime(pub i64);

impl GameTime {
    /// Time `ms` milliseconds after `self`, saturating at `i64::MAX`.
    pub fn after_ms(self, ms: i64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<i64> for GameTime {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Name of a process category, e.g. `"Smelt"`.
///
/// A workstation declares which types it supports and whether each is
/// automatic. At most one run per type is in flight on a workstation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessType(String);

impl ProcessType {
    /// Create a process type from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The type name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessType {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for ProcessType {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl Borrow<str> for ProcessType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Registry identifier of a single process definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(String);

impl ProcessId {
    /// Create a process id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl Borrow<str> for ProcessId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn entity_id_equality_includes_generation() {
        let a = EntityId::new(3, 0);
        let b = EntityId::new(3, 1);
        assert_ne!(a, b);
        assert_eq!(a, EntityId::new(3, 0));
    }

    #[test]
    fn entity_id_display() {
        assert_eq!(EntityId::new(7, 2).to_string(), "7v2");
    }

    #[test]
    fn game_time_after_saturates() {
        assert_eq!(GameTime(1000).after_ms(250), GameTime(1250));
        assert_eq!(GameTime(i64::MAX).after_ms(1), GameTime(i64::MAX));
    }

    #[test]
    fn process_type_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(ProcessType::from("Smelt"));
        assert!(set.contains("Smelt"));
        assert!(!set.contains("Carve"));
    }

    #[test]
    fn process_id_display_is_raw() {
        assert_eq!(ProcessId::new("S1").to_string(), "S1");
    }
}
