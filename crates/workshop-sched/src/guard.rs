//! Re-entrancy flag serializing scheduling passes.
//!
//! [`ReentrancyGuard`] is not a lock. The scheduler runs on a single tick
//! thread; the flag only records that a pass is active so that events
//! published from inside process logic append to the queue instead of
//! starting a nested drain.

/// Single-flag guard marking an active scheduling pass.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    executing: bool,
}

impl ReentrancyGuard {
    /// A released guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the guard if it is free.
    ///
    /// Returns `true` if the caller now holds it. A `false` return means
    /// another pass is active and the caller must not drain.
    pub fn enter(&mut self) -> bool {
        if self.executing {
            return false;
        }
        self.executing = true;
        true
    }

    /// Take the guard regardless of its state.
    ///
    /// Returns whether it was already held.
    pub fn force(&mut self) -> bool {
        std::mem::replace(&mut self.executing, true)
    }

    /// Release the guard. Only the holder may call this.
    pub fn exit(&mut self) {
        self.executing = false;
    }

    /// Whether a pass is active.
    pub fn is_held(&self) -> bool {
        self.executing
    }
}
