//! This crate provides the core of a personal planner: events, todos and the calendars that display them.
//!
//! Events and todos are kept in a [`LocalStore`], that persists them into a key-value [`Storage`](traits::Storage) and notifies
//! its listeners whenever a collection changes. \
//! Read-only views over these collections are built by the [`query`] module (filters, dashboard statistics) and the
//! [`calendar`] module (month, week and day grids, annotated with Korean holidays).
//!
//! Members of the service are managed by the [`member`] module. Their directory lives on a remote server, with a local
//! fallback for when it is not reachable.

pub mod traits;
pub mod config;

mod item;
pub use item::ItemId;
pub mod storage;
pub use storage::{FolderStorage, MemoryStorage};
pub mod notify;
pub use notify::Topic;

pub mod reminder;
pub use reminder::ReminderOffset;
pub mod event;
pub use event::Event;
pub mod todo;
pub use todo::Todo;
pub mod store;
pub use store::LocalStore;

pub mod query;
pub mod calendar;
pub use calendar::CalendarView;
pub mod validation;
pub use validation::EventForm;

pub mod member;
pub use member::{Member, Session};
pub mod mock_behaviour;

pub mod utils;
