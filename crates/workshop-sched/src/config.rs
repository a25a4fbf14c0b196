//! Scheduler configuration and validation.

/// Tunables for a [`Scheduler`](crate::Scheduler).
///
/// The processing timer's action id is deliberately absent: it is the
/// fixed constant [`WORKSTATION_PROCESSING`](workshop_core::WORKSTATION_PROCESSING)
/// shared with the host's timer service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Skip enqueueing a workstation that is already waiting in the
    /// pending queue. Default: `false`.
    pub dedup_pending: bool,
    /// Maximum queue pops in a single drain. A drain that reaches the
    /// budget with entries left fails with
    /// [`SchedulerError::DrainBudgetExceeded`](crate::SchedulerError::DrainBudgetExceeded).
    /// Default: 65536. Minimum: 1.
    pub drain_budget: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            dedup_pending: false,
            drain_budget: 65_536,
        }
    }
}

impl SchedulerConfig {
    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drain_budget == 0 {
            return Err(ConfigError::ZeroDrainBudget);
        }
        Ok(())
    }
}

/// Errors detected during [`SchedulerConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `drain_budget` is zero, which would make every drain fail.
    #[error("drain_budget must be at least 1")]
    ZeroDrainBudget,
}
