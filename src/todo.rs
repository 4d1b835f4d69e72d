//! Todos: lightweight free-text notes

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{CONVERTED_TODO_CATEGORY, UNTITLED};
use crate::event::{default_color, NewEvent};
use crate::item::ItemId;
use crate::notify::Topic;
use crate::traits::Record;

/// A todo note
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: ItemId,
    /// May be empty
    #[serde(default)]
    title: String,
    /// The main text of the note
    #[serde(default)]
    content: String,
    #[serde(default)]
    is_completed: bool,

    /// The time this todo was created.
    /// This will be populated by this crate, but can be missing from data written by older versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn id(&self) -> &ItemId       { &self.id }
    pub fn title(&self) -> &str       { &self.title }
    pub fn content(&self) -> &str     { &self.content }
    pub fn completed(&self) -> bool   { self.is_completed }
    pub fn created_at(&self) -> Option<&DateTime<Utc>> { self.created_at.as_ref() }
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> { self.updated_at.as_ref() }

    /// Build the event this todo converts to, on the given day.
    ///
    /// This is a one-way copy: the todo itself is left untouched.
    pub fn to_new_event(&self, today: NaiveDate) -> NewEvent {
        let title = if self.title.is_empty() { UNTITLED.to_string() } else { self.title.clone() };
        let mut new = NewEvent::new(title, today, today);
        new.description = Some(self.content.clone());
        new.color = Some(default_color());
        new.category = Some(CONVERTED_TODO_CATEGORY.to_string());
        new.is_completed = self.is_completed;
        new
    }

    /// Whether `needle` (already lowercased) appears in the title or the content
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

impl Record for Todo {
    type New = NewTodo;
    type Patch = TodoPatch;

    fn collection() -> &'static str { "todos" }
    fn topic() -> Topic { Topic::Todos }

    /// New todos always start uncompleted
    fn create(new: NewTodo, id: ItemId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            is_completed: false,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn id(&self) -> &ItemId { &self.id }
    fn is_completed(&self) -> bool { self.is_completed }

    fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title { self.title = title; }
        if let Some(content) = patch.content { self.content = content; }
        if let Some(is_completed) = patch.is_completed { self.is_completed = is_completed; }
    }

    fn updated_at_mut(&mut self) -> &mut Option<DateTime<Utc>> {
        &mut self.updated_at
    }
}

/// The content of a todo that has not been added to a store yet
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
}

impl NewTodo {
    pub fn with_content<S: ToString>(content: S) -> Self {
        Self {
            title: String::new(),
            content: content.to_string(),
        }
    }
}

/// A partial update of a [`Todo`]. `None` leaves a field untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}

impl TodoPatch {
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_copies_content() {
        let todo = Todo::create(NewTodo::with_content("buy milk"), ItemId::from("7"), Utc::now());
        let today = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let new = todo.to_new_event(today);

        assert_eq!(new.title, "제목 없음");
        assert_eq!(new.description.as_deref(), Some("buy milk"));
        assert_eq!(new.start_date, today);
        assert_eq!(new.end_date, today);
        assert_eq!(new.category.as_deref(), Some("메모에서 변환"));
        assert_eq!(new.is_completed, false);
    }

    #[test]
    fn updated_at_never_goes_backwards() {
        let created = Utc::now();
        let mut todo = Todo::create(NewTodo::with_content("a"), ItemId::random(), created);

        todo.touch(created - chrono::Duration::seconds(60));
        assert_eq!(todo.updated_at(), Some(&created));

        let later = created + chrono::Duration::seconds(60);
        todo.touch(later);
        assert_eq!(todo.updated_at(), Some(&later));
        assert_eq!(todo.created_at(), Some(&created));
    }

    #[test]
    fn search_is_case_insensitive() {
        let todo = Todo::create(NewTodo { title: "Groceries".to_string(), content: "Buy MILK".to_string() }, ItemId::random(), Utc::now());
        assert!(todo.matches("milk"));
        assert!(todo.matches("grocer"));
        assert!(todo.matches("bread") == false);
    }
}
