//! This module provides the local store for events and todos
//!
//! Each collection is persisted as a whole, as a JSON array under its own key of a [`Storage`].
//! A collection that cannot be read is treated as empty (this is logged).
//! Every mutation persists the collection, then emits exactly one [`Topic`] notification, even if the write failed.
//! Write failures are logged and returned to the caller.

use std::error::Error;

use chrono::{NaiveDate, Utc};

use crate::event::{Event, EventPatch, NewEvent};
use crate::item::ItemId;
use crate::notify::{ListenerId, Notifier, Topic};
use crate::query;
use crate::todo::{NewTodo, Todo, TodoPatch};
use crate::traits::{Record, Storage};


/// The owner of the Event and Todo collections
#[derive(Debug)]
pub struct LocalStore<S: Storage> {
    storage: S,
    notifier: Notifier<LocalStore<S>>,
}

impl<S: Storage> LocalStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            notifier: Notifier::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Register a listener, called after every mutation of the `topic` collection.
    /// The listener is given the store, so that it can read the new state of the collection
    pub fn subscribe<F>(&mut self, topic: Topic, listener: F) -> ListenerId
    where
        F: FnMut(&LocalStore<S>) + 'static,
    {
        self.notifier.subscribe(topic, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Returns the full collection, in storage order.
    ///
    /// A missing collection is empty. So is a collection that cannot be read or deserialized (this is logged).
    pub fn list<R: Record>(&self) -> Vec<R> {
        let key = crate::config::storage_key(R::collection());
        let content = match self.storage.get_item(&key) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Unable to read {}: {}", key, err);
                return Vec::new();
            },
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("Invalid content for {}: {}. Using an empty collection", key, err);
                Vec::new()
            },
        }
    }

    /// Store the whole collection
    fn save<R: Record>(&mut self, records: &[R]) -> Result<(), Box<dyn Error>> {
        let key = crate::config::storage_key(R::collection());
        let result = match serde_json::to_string(records) {
            Ok(content) => self.storage.set_item(&key, &content),
            Err(err) => Err(err.into()),
        };

        if let Err(err) = &result {
            log::warn!("Unable to save {}: {}", key, err);
        }
        result
    }

    fn save_and_notify<R: Record>(&mut self, records: &[R]) -> Result<(), Box<dyn Error>> {
        let result = self.save(records);

        // Listeners get a shared view of the store while the notifier is detached from it
        let mut notifier = std::mem::take(&mut self.notifier);
        notifier.emit(R::topic(), self);
        self.notifier = notifier;

        result
    }

    pub fn get_by_id<R: Record>(&self, id: &ItemId) -> Option<R> {
        self.list::<R>()
            .into_iter()
            .find(|record| record.id() == id)
    }

    /// Append a new record, with a fresh ID and creation time
    pub fn add<R: Record>(&mut self, new: R::New) -> Result<R, Box<dyn Error>> {
        let mut records = self.list::<R>();
        let record = R::create(new, ItemId::random(), Utc::now());
        log::debug!("Adding {} to {}", record.id(), R::collection());
        records.push(record.clone());
        self.save_and_notify(&records)?;
        Ok(record)
    }

    /// Merge `patch` into the record with this ID.
    /// Returns the updated record, or `None` (and does nothing) if there is no such record
    pub fn update<R: Record>(&mut self, id: &ItemId, patch: R::Patch) -> Result<Option<R>, Box<dyn Error>> {
        let mut records = self.list::<R>();
        let record = match records.iter_mut().find(|record| record.id() == id) {
            None => {
                log::debug!("No item {} in {}, nothing to update", id, R::collection());
                return Ok(None);
            },
            Some(record) => record,
        };
        record.apply(patch);
        record.touch(Utc::now());
        let updated = record.clone();

        self.save_and_notify(&records)?;
        Ok(Some(updated))
    }

    /// Remove the record with this ID. Removing an unknown ID is not an error
    pub fn remove<R: Record>(&mut self, id: &ItemId) -> Result<(), Box<dyn Error>> {
        self.remove_many::<R>(std::slice::from_ref(id))
    }

    /// Remove every record whose ID is in `ids`, in a single write (hence a single notification)
    pub fn remove_many<R: Record>(&mut self, ids: &[ItemId]) -> Result<(), Box<dyn Error>> {
        let mut records = self.list::<R>();
        records.retain(|record| ids.contains(record.id()) == false);
        self.save_and_notify(&records)
    }

    pub fn completed<R: Record>(&self) -> Vec<R> {
        self.list::<R>()
            .into_iter()
            .filter(|record| record.is_completed())
            .collect()
    }

    /// Records whose completion flag is unset count as pending
    pub fn pending<R: Record>(&self) -> Vec<R> {
        self.list::<R>()
            .into_iter()
            .filter(|record| record.is_completed() == false)
            .collect()
    }
}

/// Shortcuts for the two collections
impl<S: Storage> LocalStore<S> {
    pub fn events(&self) -> Vec<Event> { self.list() }
    pub fn todos(&self) -> Vec<Todo>   { self.list() }

    pub fn get_event(&self, id: &ItemId) -> Option<Event> { self.get_by_id(id) }
    pub fn get_todo(&self, id: &ItemId) -> Option<Todo>   { self.get_by_id(id) }

    pub fn add_event(&mut self, new: NewEvent) -> Result<Event, Box<dyn Error>> { self.add(new) }
    pub fn add_todo(&mut self, new: NewTodo) -> Result<Todo, Box<dyn Error>>    { self.add(new) }

    pub fn update_event(&mut self, id: &ItemId, patch: EventPatch) -> Result<Option<Event>, Box<dyn Error>> { self.update(id, patch) }
    pub fn update_todo(&mut self, id: &ItemId, patch: TodoPatch) -> Result<Option<Todo>, Box<dyn Error>>    { self.update(id, patch) }

    pub fn delete_event(&mut self, id: &ItemId) -> Result<(), Box<dyn Error>> { self.remove::<Event>(id) }
    pub fn delete_todo(&mut self, id: &ItemId) -> Result<(), Box<dyn Error>>  { self.remove::<Todo>(id) }
    pub fn delete_todos(&mut self, ids: &[ItemId]) -> Result<(), Box<dyn Error>> { self.remove_many::<Todo>(ids) }

    /// Events starting on this day
    pub fn events_by_date(&self, date: NaiveDate) -> Vec<Event> {
        query::events_on_date(&self.events(), date)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Create an event out of a todo (see [`Todo::to_new_event`]).
    /// The todo is left as it is. Returns `None` if there is no such todo
    pub fn convert_todo_to_event(&mut self, todo_id: &ItemId, today: NaiveDate) -> Result<Option<Event>, Box<dyn Error>> {
        match self.get_todo(todo_id) {
            None => Ok(None),
            Some(todo) => self.add_event(todo.to_new_event(today)).map(Some),
        }
    }
}
