//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Prefix of every key this crate writes into a [`Storage`](crate::traits::Storage) (e.g. `planit_events`).
/// Feel free to override it when initing this library.
pub static STORAGE_PREFIX: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("planit".to_string())));

/// Base URL of the member directory server.
/// Feel free to override it when initing this library.
pub static MEMBER_API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:8080".to_string())));

/// The color given to events that do not specify one
pub const DEFAULT_EVENT_COLOR: &str = "#007bff";

/// Category stamped on events converted from a todo
pub const CONVERTED_TODO_CATEGORY: &str = "메모에서 변환";

/// Title given to events converted from a todo that had no title
pub const UNTITLED: &str = "제목 없음";

/// Returns the storage key of a collection, e.g. `planit_todos` for `"todos"`
pub fn storage_key(collection: &str) -> String {
    format!("{}_{}", read(&STORAGE_PREFIX), collection)
}

/// Returns the currently configured member directory URL
pub fn member_api_url() -> String {
    read(&MEMBER_API_URL)
}

fn read(value: &Lazy<Arc<Mutex<String>>>) -> String {
    match value.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
