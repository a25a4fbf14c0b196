//! Bounded trigger channel between the host's event sources and the tick
//! thread that owns the [`Scheduler`](crate::Scheduler).
//!
//! Producers on any thread publish [`Trigger`]s through a cloneable
//! [`TriggerSender`]. The tick thread calls
//! [`Scheduler::pump`](crate::Scheduler::pump) with the matching
//! [`TriggerReceiver`], which dispatches everything buffered so far in
//! arrival order. Publishing never blocks; a full channel is reported
//! to the producer.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use workshop_core::Trigger;

/// Errors from [`TriggerSender::publish`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// The channel is at capacity.
    #[error("trigger bus is full")]
    Full,
    /// The receiving side has been dropped.
    #[error("trigger bus receiver disconnected")]
    Disconnected,
}

/// Create a bus holding at most `capacity` undelivered triggers.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn trigger_bus(capacity: usize) -> (TriggerSender, TriggerReceiver) {
    assert!(capacity > 0, "trigger bus capacity must be at least 1");
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (TriggerSender { tx }, TriggerReceiver { rx })
}

/// Producer half of the trigger bus.
#[derive(Clone, Debug)]
pub struct TriggerSender {
    tx: Sender<Trigger>,
}

impl TriggerSender {
    /// Enqueue `trigger` for the tick thread without blocking.
    pub fn publish(&self, trigger: Trigger) -> Result<(), BusError> {
        self.tx.try_send(trigger).map_err(|e| match e {
            TrySendError::Full(_) => BusError::Full,
            TrySendError::Disconnected(_) => BusError::Disconnected,
        })
    }
}

/// Consumer half of the trigger bus, owned by the tick thread.
#[derive(Debug)]
pub struct TriggerReceiver {
    rx: Receiver<Trigger>,
}

impl TriggerReceiver {
    /// Take the oldest buffered trigger, if any.
    pub fn try_next(&self) -> Option<Trigger> {
        self.rx.try_recv().ok()
    }

    /// Number of buffered triggers.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workshop_core::EntityId;

    fn added(i: u32) -> Trigger {
        Trigger::Added {
            workstation: EntityId::new(i, 0),
        }
    }

    #[test]
    fn delivers_in_publish_order() {
        let (tx, rx) = trigger_bus(4);
        tx.publish(added(1)).unwrap();
        tx.publish(added(2)).unwrap();
        assert_eq!(rx.len(), 2);
        assert_eq!(rx.try_next(), Some(added(1)));
        assert_eq!(rx.try_next(), Some(added(2)));
        assert_eq!(rx.try_next(), None);
    }

    #[test]
    fn full_bus_rejects() {
        let (tx, _rx) = trigger_bus(1);
        tx.publish(added(1)).unwrap();
        assert_eq!(tx.publish(added(2)), Err(BusError::Full));
    }

    #[test]
    fn dropped_receiver_disconnects() {
        let (tx, rx) = trigger_bus(1);
        drop(rx);
        assert_eq!(tx.publish(added(1)), Err(BusError::Disconnected));
    }

    #[test]
    fn publish_from_other_thread() {
        let (tx, rx) = trigger_bus(16);
        let producer = {
            let tx = tx.clone();
            std::thread::spawn(move || {
                for i in 0..8 {
                    tx.publish(added(i)).unwrap();
                }
            })
        };
        producer.join().unwrap();
        let got: Vec<_> = std::iter::from_fn(|| rx.try_next()).collect();
        assert_eq!(got, (0..8).map(added).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity_panics() {
        let _ = trigger_bus(0);
    }
}
