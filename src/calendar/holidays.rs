//! Korean public holidays and memorial days
//!
//! Lunar holidays are not computed: they come from a hand-written table that only covers a few years.
//! Dates of other years simply have no lunar holiday.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    /// A public holiday
    Holiday,
    /// A memorial day, which is not a day off
    Memorial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Holiday {
    name: &'static str,
    kind: HolidayKind,
}

impl Holiday {
    const fn holiday(name: &'static str) -> Self {
        Self { name, kind: HolidayKind::Holiday }
    }

    const fn memorial(name: &'static str) -> Self {
        Self { name, kind: HolidayKind::Memorial }
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn kind(&self) -> HolidayKind  { self.kind }

    pub fn is_holiday(&self) -> bool {
        self.kind == HolidayKind::Holiday
    }
}

/// A holiday, and the day it falls on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DatedHoliday {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub holiday: Holiday,
}

fn fixed_holiday(month: u32, day: u32) -> Option<Holiday> {
    let name = match (month, day) {
        (1, 1) => "신정",
        (3, 1) => "삼일절",
        (5, 5) => "어린이날",
        (6, 6) => "현충일",
        (8, 15) => "광복절",
        (10, 3) => "개천절",
        (10, 9) => "한글날",
        (12, 25) => "크리스마스",
        _ => return None,
    };
    Some(Holiday::holiday(name))
}

fn lunar_holiday(year: i32, month: u32, day: u32) -> Option<Holiday> {
    let name = match (year, month, day) {
        (2024, 1, 29..=31) => "설날",
        (2024, 5, 15) => "부처님오신날",
        (2024, 9, 16..=18) => "추석",

        (2025, 1, 28..=30) => "설날",
        (2025, 5, 5) => "부처님오신날",
        (2025, 10, 5..=7) => "추석",
        _ => return None,
    };
    Some(Holiday::holiday(name))
}

fn memorial_day(month: u32, day: u32) -> Option<Holiday> {
    let name = match (month, day) {
        (2, 14) => "밸런타인데이",
        (3, 14) => "화이트데이",
        (4, 5) => "식목일",
        (4, 14) => "블랙데이",
        (5, 8) => "어버이날",
        (5, 15) => "스승의날",
        (5, 21) => "부부의날",
        (6, 14) => "로즈데이",
        (7, 17) => "제헌절",
        (11, 11) => "빼빼로데이",
        (12, 31) => "연말",
        _ => return None,
    };
    Some(Holiday::memorial(name))
}

/// The holiday or memorial day falling on `date`, if any.
///
/// When several match, fixed holidays win over lunar ones, which win over memorial days.
pub fn lookup(date: NaiveDate) -> Option<Holiday> {
    let (month, day) = (date.month(), date.day());
    fixed_holiday(month, day)
        .or_else(|| lunar_holiday(date.year(), month, day))
        .or_else(|| memorial_day(month, day))
}

pub fn is_holiday(date: NaiveDate) -> bool {
    matches!(lookup(date), Some(h) if h.kind == HolidayKind::Holiday)
}

pub fn is_memorial_day(date: NaiveDate) -> bool {
    matches!(lookup(date), Some(h) if h.kind == HolidayKind::Memorial)
}

/// Every holiday of a month, in date order
pub fn holidays_for_month(year: i32, month: u32) -> Vec<DatedHoliday> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first,
        None => return Vec::new(),
    };

    first.iter_days()
        .take_while(|date| date.month() == month)
        .filter_map(|date| lookup(date).map(|holiday| DatedHoliday { date, holiday }))
        .collect()
}

/// Every holiday of a year, in date order
pub fn holidays_for_year(year: i32) -> Vec<DatedHoliday> {
    (1..=12)
        .flat_map(|month| holidays_for_month(year, month))
        .collect()
}
