//! Change notifications emitted by a [`LocalStore`](crate::store::LocalStore)
//!
//! Notifications carry no payload: a listener is handed a read-only view of the store, and is expected to re-read the whole collection.

use std::fmt::{Debug, Formatter};

/// The collection a notification is about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// "event changed"
    Events,
    /// "todo changed"
    Todos,
}

/// Returned by `subscribe`, and needed to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A registry of listeners, per topic. Listeners are given a shared reference to a `T` when notified
pub struct Notifier<T> {
    next_id: u64,
    listeners: Vec<(ListenerId, Topic, Listener<T>)>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, topic: Topic, listener: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, topic, Box::new(listener)));
        id
    }

    /// Returns whether this listener was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Call every listener of this topic, in subscription order
    pub fn emit(&mut self, topic: Topic, source: &T) {
        log::debug!("Notifying {:?} listeners", topic);
        for (_, listener_topic, listener) in self.listeners.iter_mut() {
            if *listener_topic == topic {
                listener(source);
            }
        }
    }

    pub fn listener_count(&self, topic: Topic) -> usize {
        self.listeners.iter()
            .filter(|(_, t, _)| *t == topic)
            .count()
    }
}

impl<T> Debug for Notifier<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("events", &self.listener_count(Topic::Events))
            .field("todos", &self.listener_count(Topic::Todos))
            .finish()
    }
}
