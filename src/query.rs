//! Read-only queries over snapshots of the store collections

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::{first_day_of_month, last_day_of_month, start_of_week};
use crate::event::Event;
use crate::todo::Todo;

/// Events that start on `date`.
///
/// Only the start date is considered: an event spanning several days only shows up on its first day.
pub fn events_on_date(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter()
        .filter(|event| event.start_date() == date)
        .collect()
}

pub fn completed(events: &[Event]) -> Vec<&Event> {
    events.iter()
        .filter(|event| event.completed())
        .collect()
}

pub fn pending(events: &[Event]) -> Vec<&Event> {
    events.iter()
        .filter(|event| event.completed() == false)
        .collect()
}

/// Events that start within `[from, to]`
pub fn events_between(events: &[Event], from: NaiveDate, to: NaiveDate) -> Vec<&Event> {
    events.iter()
        .filter(|event| event.start_date() >= from && event.start_date() <= to)
        .collect()
}

pub fn today_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    events_on_date(events, today)
}

/// Events that start in the Sunday-to-Saturday week containing `today`
pub fn this_week_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    let sunday = start_of_week(today);
    events_between(events, sunday, sunday + Duration::days(6))
}

/// Events that start in the calendar month of `today`
pub fn this_month_events(events: &[Event], today: NaiveDate) -> Vec<&Event> {
    match (first_day_of_month(today.year(), today.month()), last_day_of_month(today.year(), today.month())) {
        (Some(first), Some(last)) => events_between(events, first, last),
        _ => Vec::new(),
    }
}


/// The figures shown on the dashboard
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
}

impl EventStats {
    pub fn compute(events: &[Event], today: NaiveDate) -> Self {
        Self {
            total: events.len(),
            completed: completed(events).len(),
            pending: pending(events).len(),
            today: today_events(events, today).len(),
            this_week: this_week_events(events, today).len(),
            this_month: this_month_events(events, today).len(),
        }
    }

    /// Percentage of completed events, rounded. 0 when there is no event at all
    pub fn completion_rate(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u32
    }
}


/// Which todos to show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    Pending,
    Completed,
}

impl Default for TodoFilter {
    fn default() -> Self {
        TodoFilter::All
    }
}

impl TodoFilter {
    pub fn accepts(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Pending => todo.completed() == false,
            TodoFilter::Completed => todo.completed(),
        }
    }
}

/// Todos accepted by `filter` whose title or content contains `search` (case-insensitively).
///
/// An empty search matches everything. The result is sorted newest first, todos without a creation date coming last.
pub fn filter_todos<'a>(todos: &'a [Todo], filter: TodoFilter, search: &str) -> Vec<&'a Todo> {
    let needle = search.to_lowercase();
    let mut filtered: Vec<&Todo> = todos.iter()
        .filter(|todo| filter.accepts(todo))
        .filter(|todo| needle.is_empty() || todo.matches(&needle))
        .collect();

    // `None` sorts before any date, so it ends up last once reversed
    filtered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    filtered
}


#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveTime, TimeZone, Utc};

    use crate::event::{EventPatch, NewEvent};
    use crate::item::ItemId;
    use crate::todo::{NewTodo, TodoPatch};
    use crate::traits::Record;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, completed: bool) -> Event {
        let mut new = NewEvent::new("e", start, start);
        new.is_completed = completed;
        Event::create(new, ItemId::random(), Utc::now())
    }

    #[test]
    fn start_date_only() {
        let mut new = NewEvent::new("trip", date(2025, 5, 1), date(2025, 5, 3));
        new.start_time = NaiveTime::from_hms_opt(23, 30, 0);
        let trip = Event::create(new, ItemId::random(), Utc::now());
        let other = event(date(2025, 5, 2), false);
        let events = vec![trip, other];

        assert_eq!(events_on_date(&events, date(2025, 5, 1)).len(), 1);
        // Multi-day events are only matched on their first day
        let on_second_day = events_on_date(&events, date(2025, 5, 2));
        assert_eq!(on_second_day.len(), 1);
        assert_eq!(on_second_day[0].title(), "e");
        assert!(events_on_date(&events, date(2025, 5, 3)).is_empty());
    }

    #[test]
    fn dashboard_windows() {
        // Wednesday, June 11th 2025. Its week goes from Sunday 8th to Saturday 14th
        let today = date(2025, 6, 11);
        let events = vec![
            event(date(2025, 6, 7), true),
            event(date(2025, 6, 8), false),
            event(date(2025, 6, 11), true),
            event(date(2025, 6, 14), false),
            event(date(2025, 6, 15), false),
            event(date(2025, 6, 30), false),
            event(date(2025, 7, 1), false),
        ];

        let stats = EventStats::compute(&events, today);
        assert_eq!(stats, EventStats {
            total: 7,
            completed: 2,
            pending: 5,
            today: 1,
            this_week: 3,
            this_month: 6,
        });
        assert_eq!(stats.completion_rate(), 29);
        assert_eq!(EventStats::compute(&[], today).completion_rate(), 0);
    }

    #[test]
    fn completion_partition() {
        let mut done = event(date(2025, 1, 1), false);
        done.apply(EventPatch::completion(true));
        let events = vec![done, event(date(2025, 1, 1), false)];
        assert_eq!(completed(&events).len(), 1);
        assert_eq!(pending(&events).len(), 1);
    }

    #[test]
    fn todo_filter_and_search() {
        let old = Todo::create(NewTodo::with_content("Buy milk"), ItemId::random(), Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());
        let mut done = Todo::create(NewTodo::with_content("milk the cow"), ItemId::random(), Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap());
        done.apply(TodoPatch::completion(true));
        let new = Todo::create(NewTodo { title: "MILKSHAKE".to_string(), content: "recipe".to_string() }, ItemId::random(), Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let legacy: Todo = serde_json::from_str(r#"{"id":"1","content":"milk from before"}"#).unwrap();
        let todos = vec![legacy, old, done, new];

        let all: Vec<&str> = filter_todos(&todos, TodoFilter::All, "Milk").iter().map(|t| t.content()).collect();
        assert_eq!(all, vec!["recipe", "milk the cow", "Buy milk", "milk from before"]);

        let pending: Vec<&str> = filter_todos(&todos, TodoFilter::Pending, "").iter().map(|t| t.content()).collect();
        assert_eq!(pending, vec!["recipe", "Buy milk", "milk from before"]);

        let completed = filter_todos(&todos, TodoFilter::Completed, "cow");
        assert_eq!(completed.len(), 1);
        assert!(filter_todos(&todos, TodoFilter::Completed, "recipe").is_empty());
    }
}
