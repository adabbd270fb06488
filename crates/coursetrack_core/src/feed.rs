//! Reactive course list projection.
//!
//! # Responsibility
//! - Fan out full list snapshots to subscribers after effective mutations.
//! - Keep the subscriber registry self-pruning when receivers go away.
//!
//! # Invariants
//! - Snapshots are complete ordered lists, not deltas; a late subscriber is
//!   caught up by the next published snapshot.
//! - The durable rows stay the source of truth; the feed is a derived,
//!   eventually-consistent projection.

use crate::model::course::Course;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Mutex;

/// Subscriber registry for course list snapshots.
///
/// Default construction starts with no subscribers; publishing to an empty
/// feed is a no-op.
#[derive(Default)]
pub struct CourseFeed {
    subscribers: Mutex<Vec<Sender<Vec<Course>>>>,
}

impl CourseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber channel.
    ///
    /// The receiver sees every snapshot published after this call. Dropping
    /// the receiver detaches it; the registry prunes it on the next publish.
    pub fn subscribe(&self) -> Receiver<Vec<Course>> {
        let (sender, receiver) = unbounded();
        self.subscribers
            .lock()
            .expect("course feed lock poisoned")
            .push(sender);
        receiver
    }

    /// Sends one list snapshot to every live subscriber.
    pub fn publish(&self, courses: &[Course]) {
        let mut subscribers = self
            .subscribers
            .lock()
            .expect("course feed lock poisoned");
        subscribers.retain(|sender| sender.send(courses.to_vec()).is_ok());
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("course feed lock poisoned")
            .len()
    }
}
