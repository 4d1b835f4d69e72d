//! Calendar events

use serde::{Deserialize, Deserializer, Serialize};
use serde::de::Error as _;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csscolorparser::Color;

use crate::item::ItemId;
use crate::notify::Topic;
use crate::reminder::ReminderOffset;
use crate::traits::Record;

/// The color given to events that do not specify one (see [`DEFAULT_EVENT_COLOR`](crate::config::DEFAULT_EVENT_COLOR))
pub fn default_color() -> Color {
    Color::from_rgb_u8(0x00, 0x7b, 0xff)
}

/// A calendar event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    id: ItemId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_blank")]
    description: Option<String>,

    start_date: NaiveDate,
    /// Not enforced here, but callers make sure this is not before `start_date`
    end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_time")]
    start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_time")]
    end_time: Option<NaiveTime>,

    #[serde(default = "default_color")]
    color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_blank")]
    category: Option<String>,
    #[serde(default)]
    is_completed: bool,

    #[serde(default)]
    reminder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_offset")]
    reminder_time: Option<ReminderOffset>,
    /// Derived from the end of the event and `reminder_time` when the event was saved.
    /// This is never recomputed by this crate.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_local_timestamp")]
    reminder_date_time: Option<NaiveDateTime>,

    /// This is populated for every event created by this crate, but may be missing from older data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn id(&self) -> &ItemId               { &self.id }
    pub fn title(&self) -> &str               { &self.title }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn start_date(&self) -> NaiveDate     { self.start_date }
    pub fn end_date(&self) -> NaiveDate       { self.end_date }
    pub fn start_time(&self) -> Option<NaiveTime> { self.start_time }
    pub fn end_time(&self) -> Option<NaiveTime>   { self.end_time }
    pub fn color(&self) -> &Color             { &self.color }
    pub fn category(&self) -> Option<&str>    { self.category.as_deref() }
    pub fn completed(&self) -> bool           { self.is_completed }
    pub fn reminder(&self) -> bool            { self.reminder }
    pub fn reminder_time(&self) -> Option<ReminderOffset>          { self.reminder_time }
    pub fn reminder_date_time(&self) -> Option<NaiveDateTime>      { self.reminder_date_time }
    pub fn created_at(&self) -> Option<&DateTime<Utc>>             { self.created_at.as_ref() }
    pub fn updated_at(&self) -> Option<&DateTime<Utc>>             { self.updated_at.as_ref() }
}

impl Record for Event {
    type New = NewEvent;
    type Patch = EventPatch;

    fn collection() -> &'static str { "events" }
    fn topic() -> Topic { Topic::Events }

    fn create(new: NewEvent, id: ItemId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            start_time: new.start_time,
            end_time: new.end_time,
            color: new.color.unwrap_or_else(default_color),
            category: new.category,
            is_completed: new.is_completed,
            reminder: new.reminder,
            reminder_time: new.reminder_time,
            reminder_date_time: new.reminder_date_time,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    fn id(&self) -> &ItemId { &self.id }
    fn is_completed(&self) -> bool { self.is_completed }

    fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title { self.title = title; }
        if let Some(description) = patch.description { self.description = description; }
        if let Some(start_date) = patch.start_date { self.start_date = start_date; }
        if let Some(end_date) = patch.end_date { self.end_date = end_date; }
        if let Some(start_time) = patch.start_time { self.start_time = start_time; }
        if let Some(end_time) = patch.end_time { self.end_time = end_time; }
        if let Some(color) = patch.color { self.color = color; }
        if let Some(category) = patch.category { self.category = category; }
        if let Some(is_completed) = patch.is_completed { self.is_completed = is_completed; }
        if let Some(reminder) = patch.reminder { self.reminder = reminder; }
        if let Some(reminder_time) = patch.reminder_time { self.reminder_time = reminder_time; }
        if let Some(reminder_date_time) = patch.reminder_date_time { self.reminder_date_time = reminder_date_time; }
    }

    fn updated_at_mut(&mut self) -> &mut Option<DateTime<Utc>> {
        &mut self.updated_at
    }
}


// Older data (and other front-ends) store unset optional fields as empty strings,
// and the reminder timestamp as a UTC instant such as "2025-06-10T04:00:00.000Z"

fn non_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| s.is_empty() == false))
}

fn optional_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
    match non_blank(deserializer)? {
        None => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
            .map(Some)
            .map_err(|err| D::Error::custom(format!("Invalid time {:?}: {}", s, err))),
    }
}

fn optional_offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ReminderOffset>, D::Error> {
    match non_blank(deserializer)? {
        None => Ok(None),
        Some(s) => match s.parse() {
            Ok(offset) => Ok(Some(offset)),
            Err(err) => {
                log::warn!("{}. Ignoring it", err);
                Ok(None)
            },
        },
    }
}

fn optional_local_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
    let s = match non_blank(deserializer)? {
        None => return Ok(None),
        Some(s) => s,
    };
    if let Ok(local) = s.parse::<NaiveDateTime>() {
        return Ok(Some(local));
    }
    DateTime::parse_from_rfc3339(&s)
        .map(|instant| Some(instant.with_timezone(&Local).naive_local()))
        .map_err(|err| D::Error::custom(format!("Invalid timestamp {:?}: {}", s, err)))
}


/// The content of an event that has not been added to a store yet
#[derive(Clone, Debug, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Defaults to [`default_color`] when `None`
    pub color: Option<Color>,
    pub category: Option<String>,
    pub is_completed: bool,
    pub reminder: bool,
    pub reminder_time: Option<ReminderOffset>,
    pub reminder_date_time: Option<NaiveDateTime>,
}

impl NewEvent {
    /// An uncompleted event without times, description or reminder
    pub fn new<S: ToString>(title: S, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            start_date,
            end_date,
            start_time: None,
            end_time: None,
            color: None,
            category: None,
            is_completed: false,
            reminder: false,
            reminder_time: None,
            reminder_date_time: None,
        }
    }
}


/// A partial update of an [`Event`].
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub color: Option<Color>,
    pub category: Option<Option<String>>,
    pub is_completed: Option<bool>,
    pub reminder: Option<bool>,
    pub reminder_time: Option<Option<ReminderOffset>>,
    pub reminder_date_time: Option<Option<NaiveDateTime>>,
}

impl EventPatch {
    /// A patch that only changes the completion status
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

    use chrono::TimeZone;

    fn sample() -> Event {
        let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let mut new = NewEvent::new("Dentist", day, day);
        new.end_time = NaiveTime::from_hms_opt(14, 0, 0);
        new.reminder = true;
        new.reminder_time = Some(ReminderOffset::OneHour);
        Event::create(new, ItemId::from("1"), Utc::now())
    }

    #[test]
    fn stored_layout() {
        let event = sample();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startDate"], "2025-06-10");
        assert_eq!(json["color"], crate::config::DEFAULT_EVENT_COLOR);
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["reminderTime"], "1hour");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn lenient_reading() {
        let event: Event = serde_json::from_str(r#"{"id":"42","title":"t","startDate":"2024-01-02","endDate":"2024-01-02"}"#).unwrap();
        assert_eq!(event.completed(), false);
        assert_eq!(event.color(), &default_color());
        assert_eq!(event.created_at(), None);
    }

    #[test]
    fn blank_fields_read_as_unset() {
        let event: Event = serde_json::from_str(r##"{
            "id": "1718000000000", "title": "Dentist", "description": "",
            "startDate": "2025-06-10", "endDate": "2025-06-10", "startTime": "", "endTime": "14:00",
            "color": "#007bff", "category": "", "isCompleted": false,
            "reminder": true, "reminderTime": "1hour", "reminderDateTime": "2025-06-10T04:00:00.000Z",
            "createdAt": "2025-06-01T09:30:00.000Z", "updatedAt": "2025-06-01T09:30:00.000Z"
        }"##).unwrap();

        assert_eq!(event.id().as_str(), "1718000000000");
        assert_eq!(event.description(), None);
        assert_eq!(event.category(), None);
        assert_eq!(event.start_time(), None);
        assert_eq!(event.end_time(), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(event.reminder_time(), Some(ReminderOffset::OneHour));

        let instant = Utc.with_ymd_and_hms(2025, 6, 10, 4, 0, 0).unwrap();
        assert_eq!(event.reminder_date_time(), Some(instant.with_timezone(&Local).naive_local()));

        // Written back in this crate's own layout
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("startTime").is_none());
        assert_eq!(json["endTime"], "14:00:00");
    }

    #[test]
    fn unset_reminder_reads_as_none() {
        let event: Event = serde_json::from_str(r#"{
            "id": "1718000000001", "title": "Lunch", "startDate": "2025-06-11", "endDate": "2025-06-11",
            "startTime": "12:00", "endTime": "", "reminder": false, "reminderTime": "", "reminderDateTime": null
        }"#).unwrap();
        assert_eq!(event.start_time(), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(event.reminder_time(), None);
        assert_eq!(event.reminder_date_time(), None);

        let local: Event = serde_json::from_str(r#"{"id":"2","title":"t","startDate":"2025-06-11","endDate":"2025-06-11","reminderDateTime":"2025-06-11T08:50:00"}"#).unwrap();
        assert_eq!(local.reminder_date_time(), NaiveDate::from_ymd_opt(2025, 6, 11).unwrap().and_hms_opt(8, 50, 0));

        assert!(serde_json::from_str::<Event>(r#"{"id":"3","title":"t","startDate":"2025-06-11","endDate":"2025-06-11","endTime":"noon"}"#).is_err());
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut event = sample();
        let before = event.clone();
        event.apply(EventPatch {
            title: Some("Doctor".to_string()),
            end_time: Some(None),
            ..EventPatch::default()
        });
        assert_eq!(event.title(), "Doctor");
        assert_eq!(event.end_time(), None);
        assert_eq!(event.reminder_time(), before.reminder_time());
        assert_eq!(event.start_date(), before.start_date());
    }
}
