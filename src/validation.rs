//! Checks performed on user input before an event reaches the store
//!
//! The store does not validate anything itself.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csscolorparser::Color;

use crate::event::{default_color, Event, EventPatch, NewEvent};
use crate::reminder::{reminder_for, ReminderOffset};

/// The form fields that can be rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    StartDate,
    EndDate,
    EndTime,
    ReminderTime,
}

impl Field {
    /// The name of the field in the stored layout
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::EndTime => "endTime",
            Field::ReminderTime => "reminderTime",
        }
    }
}

/// Messages for the rejected fields, at most one per field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool { self.errors.is_empty() }
    pub fn len(&self) -> usize     { self.errors.len() }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    /// A later message for the same field replaces the earlier one
    fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if first == false {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.as_str(), message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}


/// The content of the event form, as typed by the user
#[derive(Clone, Debug, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Color,
    pub category: String,
    pub is_completed: bool,
    pub reminder: bool,
    pub reminder_time: Option<ReminderOffset>,
}

impl EventForm {
    /// An empty form, whose start and end dates are `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_date: Some(date),
            end_date: Some(date),
            start_time: None,
            end_time: None,
            color: default_color(),
            category: String::new(),
            is_completed: false,
            reminder: false,
            reminder_time: None,
        }
    }

    /// A form pre-filled to edit an existing event
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title().to_string(),
            description: event.description().unwrap_or_default().to_string(),
            start_date: Some(event.start_date()),
            end_date: Some(event.end_date()),
            start_time: event.start_time(),
            end_time: event.end_time(),
            color: event.color().clone(),
            category: event.category().unwrap_or_default().to_string(),
            is_completed: event.completed(),
            reminder: event.reminder(),
            reminder_time: event.reminder_time(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.insert(Field::Title, "일정 제목을 입력해주세요.");
        }
        if self.start_date.is_none() {
            errors.insert(Field::StartDate, "시작 날짜를 선택해주세요.");
        }
        if self.end_date.is_none() {
            errors.insert(Field::EndDate, "종료 날짜를 선택해주세요.");
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.insert(Field::EndDate, "종료 날짜는 시작 날짜보다 이후여야 합니다.");
            }
            // Times are only compared within the same day
            if let (Some(start_time), Some(end_time)) = (self.start_time, self.end_time) {
                if start == end && start_time >= end_time {
                    errors.insert(Field::EndTime, "종료 시간은 시작 시간보다 이후여야 합니다.");
                }
            }
        }

        if self.reminder && self.reminder_time.is_none() {
            errors.insert(Field::ReminderTime, "알림 시점을 선택해주세요.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            log::debug!("Rejected event form: {}", errors);
            Err(errors)
        }
    }

    /// When the reminder of this event should fire, if it has one
    pub fn reminder_date_time(&self) -> Option<NaiveDateTime> {
        reminder_for(self.reminder, self.end_date?, self.end_time, self.reminder_time)
    }

    /// Validate this form, and turn it into something that can be added to a store.
    ///
    /// The reminder timestamp is computed here, once.
    pub fn into_new_event(self) -> Result<NewEvent, ValidationErrors> {
        self.validate()?;
        let reminder_date_time = self.reminder_date_time();
        let (start_date, end_date) = self.dates()?;

        Ok(NewEvent {
            title: self.title,
            description: non_empty(self.description),
            start_date,
            end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            color: Some(self.color),
            category: non_empty(self.category),
            is_completed: self.is_completed,
            reminder: self.reminder,
            reminder_time: self.reminder_time,
            reminder_date_time,
        })
    }

    /// Validate this form, and turn it into a patch that overwrites every field of an existing event.
    ///
    /// The reminder timestamp is recomputed from the form.
    pub fn into_patch(self) -> Result<EventPatch, ValidationErrors> {
        let new = self.into_new_event()?;
        Ok(EventPatch {
            title: Some(new.title),
            description: Some(new.description),
            start_date: Some(new.start_date),
            end_date: Some(new.end_date),
            start_time: Some(new.start_time),
            end_time: Some(new.end_time),
            color: new.color,
            category: Some(new.category),
            is_completed: Some(new.is_completed),
            reminder: Some(new.reminder),
            reminder_time: Some(new.reminder_time),
            reminder_date_time: Some(new.reminder_date_time),
        })
    }

    fn dates(&self) -> Result<(NaiveDate, NaiveDate), ValidationErrors> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ValidationErrors::default()),
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_form() -> EventForm {
        let mut form = EventForm::for_date(date(2025, 6, 10));
        form.title = "Meeting".to_string();
        form
    }

    #[test]
    fn valid() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn every_field_rejected() {
        let mut form = valid_form();
        form.title = "   ".to_string();
        form.start_date = None;
        form.end_date = None;
        form.reminder = true;

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Title), Some("일정 제목을 입력해주세요."));
        assert_eq!(errors.get(Field::StartDate), Some("시작 날짜를 선택해주세요."));
        assert_eq!(errors.get(Field::EndDate), Some("종료 날짜를 선택해주세요."));
        assert_eq!(errors.get(Field::ReminderTime), Some("알림 시점을 선택해주세요."));
    }

    #[test]
    fn end_before_start() {
        let mut form = valid_form();
        form.end_date = Some(date(2025, 6, 9));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::EndDate), Some("종료 날짜는 시작 날짜보다 이후여야 합니다."));
        assert!(errors.to_string().starts_with("endDate: "));
    }

    #[test]
    fn times_only_compared_on_the_same_day() {
        let mut form = valid_form();
        form.start_time = NaiveTime::from_hms_opt(15, 0, 0);
        form.end_time = NaiveTime::from_hms_opt(15, 0, 0);
        assert_eq!(form.validate().unwrap_err().get(Field::EndTime), Some("종료 시간은 시작 시간보다 이후여야 합니다."));

        form.end_date = Some(date(2025, 6, 11));
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn reminder_is_computed_once() {
        let mut form = valid_form();
        form.end_time = NaiveTime::from_hms_opt(14, 0, 0);
        form.reminder = true;
        form.reminder_time = Some(ReminderOffset::OneHour);

        let new = form.into_new_event().unwrap();
        assert_eq!(new.reminder_date_time, Some(date(2025, 6, 10).and_hms_opt(13, 0, 0).unwrap()));
        assert_eq!(new.description, None);
        assert_eq!(new.color, Some(default_color()));
    }

    #[test]
    fn patch_clears_removed_reminder() {
        let mut form = valid_form();
        form.reminder = false;
        form.reminder_time = Some(ReminderOffset::OneDay);
        let patch = form.into_patch().unwrap();
        assert_eq!(patch.reminder_date_time, Some(None));
        assert_eq!(patch.title.as_deref(), Some("Meeting"));
    }
}
