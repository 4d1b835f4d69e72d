//! Reminder timestamps, derived from the end of an event
//!
//! The timestamp is computed once, when the event is saved. It is stored as-is and never recomputed afterwards.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// How long before the end of an event its reminder fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderOffset {
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "10min")]
    TenMinutes,
}

impl ReminderOffset {
    pub fn duration(&self) -> Duration {
        match self {
            ReminderOffset::OneDay => Duration::seconds(86_400),
            ReminderOffset::OneHour => Duration::seconds(3_600),
            ReminderOffset::ThirtyMinutes => Duration::seconds(1_800),
            ReminderOffset::TenMinutes => Duration::seconds(600),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderOffset::OneDay => "1day",
            ReminderOffset::OneHour => "1hour",
            ReminderOffset::ThirtyMinutes => "30min",
            ReminderOffset::TenMinutes => "10min",
        }
    }
}

impl FromStr for ReminderOffset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1day" => Ok(ReminderOffset::OneDay),
            "1hour" => Ok(ReminderOffset::OneHour),
            "30min" => Ok(ReminderOffset::ThirtyMinutes),
            "10min" => Ok(ReminderOffset::TenMinutes),
            other => Err(format!("Unknown reminder offset {:?}", other)),
        }
    }
}

impl Display for ReminderOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute when the reminder of an event ending at `end_date` (and `end_time`, if any) should fire.
///
/// Events without an end time end at 23:59:59.
/// Returns `None` for an unrecognized `offset_kind`, in which case no notification must be scheduled.
pub fn compute_reminder(end_date: NaiveDate, end_time: Option<NaiveTime>, offset_kind: &str) -> Option<NaiveDateTime> {
    match offset_kind.parse::<ReminderOffset>() {
        Ok(offset) => reminder_at(end_date, end_time, offset),
        Err(err) => {
            log::debug!("{}, no reminder computed", err);
            None
        }
    }
}

/// Same as [`compute_reminder`], for an already-parsed reminder setting.
///
/// Returns `None` when the reminder is disabled or has no offset.
pub fn reminder_for(enabled: bool, end_date: NaiveDate, end_time: Option<NaiveTime>, offset: Option<ReminderOffset>) -> Option<NaiveDateTime> {
    if enabled == false {
        return None;
    }
    reminder_at(end_date, end_time, offset?)
}

fn reminder_at(end_date: NaiveDate, end_time: Option<NaiveTime>, offset: ReminderOffset) -> Option<NaiveDateTime> {
    let end_time = match end_time {
        Some(t) => t,
        None => NaiveTime::from_hms_opt(23, 59, 59)?,
    };
    end_date.and_time(end_time).checked_sub_signed(offset.duration())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn one_hour_before_end_time() {
        let end_time = NaiveTime::from_hms_opt(14, 0, 0);
        assert_eq!(compute_reminder(date("2025-06-10"), end_time, "1hour"), Some(at("2025-06-10T13:00:00")));
    }

    #[test]
    fn one_day_before_end_of_day() {
        assert_eq!(compute_reminder(date("2025-06-10"), None, "1day"), Some(at("2025-06-09T23:59:59")));
    }

    #[test]
    fn minutes_cross_midnight() {
        let end_time = NaiveTime::from_hms_opt(0, 5, 0);
        assert_eq!(compute_reminder(date("2025-01-01"), end_time, "10min"), Some(at("2024-12-31T23:55:00")));
        assert_eq!(compute_reminder(date("2025-01-01"), end_time, "30min"), Some(at("2024-12-31T23:35:00")));
    }

    #[test]
    fn unknown_or_disabled() {
        assert_eq!(compute_reminder(date("2025-06-10"), None, "2weeks"), None);
        assert_eq!(compute_reminder(date("2025-06-10"), None, ""), None);
        assert_eq!(reminder_for(false, date("2025-06-10"), None, Some(ReminderOffset::OneDay)), None);
        assert_eq!(reminder_for(true, date("2025-06-10"), None, None), None);
        assert_eq!(reminder_for(true, date("2025-06-10"), None, Some(ReminderOffset::OneDay)), Some(at("2025-06-09T23:59:59")));
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&ReminderOffset::ThirtyMinutes).unwrap(), "\"30min\"");
        let parsed: ReminderOffset = serde_json::from_str("\"1hour\"").unwrap();
        assert_eq!(parsed, ReminderOffset::OneHour);
    }
}
