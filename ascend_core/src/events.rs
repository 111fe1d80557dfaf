//! Typed progression events and their dispatch.
//!
//! Progression functions return events as plain values; an [`EventBus`]
//! fans them out to whichever subscribers the caller registered.

use crate::{CharacterTier, WorkoutDay};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Something downstream consumers may react to
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// Level rose; emitted once per update regardless of levels crossed
    LevelUp { from: u32, to: u32 },
    /// Derived tier changed; carries only the final tier of the update
    TierChanged {
        from: CharacterTier,
        to: CharacterTier,
    },
    /// Workout XP was credited
    WorkoutRecorded {
        xp: u64,
        total_weight: f64,
        exercise_count: u32,
    },
    /// A session was persisted to history
    WorkoutCompleted { session_id: Uuid, day: WorkoutDay },
}

/// Receiver of dispatched events
pub trait EventSubscriber {
    fn publish(&mut self, event: &ProgressEvent);
}

/// Explicit subscriber list
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventSubscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver each event, in order, to every subscriber
    pub fn dispatch(&mut self, events: &[ProgressEvent]) {
        for event in events {
            for subscriber in self.subscribers.iter_mut() {
                subscriber.publish(event);
            }
        }
    }
}

/// Writes events to the tracing log
pub struct LogSubscriber;

impl EventSubscriber for LogSubscriber {
    fn publish(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::LevelUp { from, to } => {
                tracing::info!("Level up: {} -> {}", from, to);
            }
            ProgressEvent::TierChanged { from, to } => {
                tracing::info!("Tier changed: {} -> {}", from, to);
            }
            ProgressEvent::WorkoutRecorded {
                xp,
                total_weight,
                exercise_count,
            } => {
                tracing::info!(
                    "Workout recorded: {} exercises, {:.1} total weight, {} XP",
                    exercise_count,
                    total_weight,
                    xp
                );
            }
            ProgressEvent::WorkoutCompleted { session_id, day } => {
                tracing::info!("Workout {} completed ({:?})", session_id, day);
            }
        }
    }
}

/// Forwards events over an mpsc channel
pub struct ChannelSubscriber {
    sender: Sender<ProgressEvent>,
}

impl ChannelSubscriber {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl EventSubscriber for ChannelSubscriber {
    fn publish(&mut self, event: &ProgressEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::debug!("Event receiver dropped, discarding {:?}", event);
        }
    }
}

/// Collects events into a shared buffer the caller keeps a handle to
#[derive(Clone, Default)]
pub struct RecordingSubscriber {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSubscriber for RecordingSubscriber {
    fn publish(&mut self, event: &ProgressEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_dispatch_reaches_all_subscribers_in_order() {
        let first = RecordingSubscriber::new();
        let second = RecordingSubscriber::new();

        let mut bus = EventBus::new();
        bus.subscribe(Box::new(first.clone()));
        bus.subscribe(Box::new(second.clone()));
        bus.subscribe(Box::new(LogSubscriber));
        assert_eq!(bus.subscriber_count(), 3);

        let events = vec![
            ProgressEvent::LevelUp { from: 1, to: 2 },
            ProgressEvent::TierChanged {
                from: CharacterTier::Beginner,
                to: CharacterTier::Intermediate,
            },
        ];
        bus.dispatch(&events);

        assert_eq!(first.events(), events);
        assert_eq!(second.events(), events);
    }

    #[test]
    fn test_channel_subscriber() {
        let (tx, rx) = mpsc::channel();
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(ChannelSubscriber::new(tx)));

        bus.dispatch(&[ProgressEvent::LevelUp { from: 3, to: 4 }]);

        assert_eq!(rx.try_recv().unwrap(), ProgressEvent::LevelUp { from: 3, to: 4 });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_subscriber_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(ChannelSubscriber::new(tx)));

        // Must not panic
        bus.dispatch(&[ProgressEvent::LevelUp { from: 1, to: 2 }]);
    }

    #[test]
    fn test_empty_bus_is_noop() {
        let mut bus = EventBus::new();
        bus.dispatch(&[ProgressEvent::LevelUp { from: 1, to: 2 }]);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
