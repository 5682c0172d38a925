//! Fan-out of engine notifications to observers.

use tally_types::{Notification, Timestamp};

pub type Listener = Box<dyn Fn(Timestamp, &Notification) + Send + Sync>;

/// Synchronous fan-out event bus for notifications.
///
/// Listeners are invoked inline on the authority task after each successful
/// command, with the time the command was applied; keep handlers fast to
/// avoid stalling the command queue.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, at: Timestamp, event: &Notification) {
        for listener in &self.listeners {
            listener(at, event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tally_types::{Identity, ProposalId};

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_, _| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_, _| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(
            Timestamp::new(1),
            &Notification::ProposalRegistered {
                id: ProposalId::FIRST,
            },
        );

        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::default();
        assert!(bus.is_empty());
        bus.emit(
            Timestamp::EPOCH,
            &Notification::ParticipantRegistered {
                identity: Identity::new([1u8; 32]),
            },
        );
    }

    #[test]
    fn listener_sees_variant_and_time() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let s = Arc::clone(&seen);
        bus.subscribe(Box::new(move |at, event| {
            if let Notification::VoteCast { .. } = event {
                s.store(at.as_secs() as usize, Ordering::SeqCst);
            }
        }));

        bus.emit(
            Timestamp::new(5),
            &Notification::ProposalRegistered {
                id: ProposalId::FIRST,
            },
        );
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        bus.emit(
            Timestamp::new(42),
            &Notification::VoteCast {
                voter: Identity::new([3u8; 32]),
                scope: tally_types::VoteScope::Session {
                    proposal: ProposalId::FIRST,
                },
            },
        );
        assert_eq!(seen.load(Ordering::SeqCst), 42);
    }
}
