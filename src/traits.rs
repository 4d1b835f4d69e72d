use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::item::ItemId;
use crate::member::{Member, Signup};
use crate::notify::Topic;

/// A string key-value persistence, such as a browser `localStorage` or a folder of files
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if nothing was ever stored there
    fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Replaces the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
}

/// A record that lives in one of the collections of a [`LocalStore`](crate::store::LocalStore)
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// What callers give to `add`
    type New;
    /// What callers give to `update`. Fields left unset are retained
    type Patch;

    /// The name of the collection, used to build its storage key
    fn collection() -> &'static str;
    /// The notification topic emitted when the collection changes
    fn topic() -> Topic;

    /// Build a record that has just been added
    fn create(new: Self::New, id: ItemId, now: DateTime<Utc>) -> Self;

    fn id(&self) -> &ItemId;
    fn is_completed(&self) -> bool;

    /// Shallow-merge a patch into this record
    fn apply(&mut self, patch: Self::Patch);

    /// The "last modified" field. It may be missing from older data
    fn updated_at_mut(&mut self) -> &mut Option<DateTime<Utc>>;

    /// Update the "last modified" field. It never goes backwards, even if the clock does
    fn touch(&mut self, now: DateTime<Utc>) {
        let updated_at = self.updated_at_mut();
        *updated_at = match *updated_at {
            Some(previous) if previous > now => Some(previous),
            _ => Some(now),
        };
    }
}

/// A directory of members, either a remote server or a local fallback
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Returns the member with this id, if any
    async fn get_member(&self, id: &str) -> Result<Option<Member>, Box<dyn Error>>;
    /// Merges the given member into the stored one (matched by id) and returns the result
    async fn update_member(&mut self, member: &Member) -> Result<Member, Box<dyn Error>>;
    async fn delete_member(&mut self, id: &str) -> Result<(), Box<dyn Error>>;
    /// Registers a new member
    async fn signup(&mut self, signup: &Signup) -> Result<Member, Box<dyn Error>>;
}
