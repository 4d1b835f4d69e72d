//! Calendar grids for the month, week and day views
//!
//! Weeks always start on Sunday.

pub mod holidays;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::event::Event;
use crate::query::events_on_date;
use holidays::Holiday;

/// How many events a date cell shows before collapsing the rest into a counter
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// Number of cells of a month grid (6 weeks of 7 days)
pub const MONTH_GRID_CELLS: usize = 42;

/// The granularity of a calendar view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Month
    }
}

/// The Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_day_of_month(year, month)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// `count` consecutive days, starting at `first`
fn days_from(first: NaiveDate, count: usize) -> Vec<NaiveDate> {
    first.iter_days().take(count).collect()
}

/// What a calendar currently shows: a reference date, and a granularity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarView {
    reference: NaiveDate,
    mode: ViewMode,
}

impl CalendarView {
    pub fn new(reference: NaiveDate, mode: ViewMode) -> Self {
        Self { reference, mode }
    }

    pub fn reference(&self) -> NaiveDate { self.reference }
    pub fn mode(&self) -> ViewMode       { self.mode }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// The dates to render, in order.
    ///
    /// * Month: always 42 days (6 full weeks), starting on the Sunday on or before the 1st of the month.
    ///   Cells outside the month are flagged by [`Self::is_current_month`]
    /// * Week: Sunday to Saturday
    /// * Day: the reference date only
    pub fn cells(&self) -> Vec<NaiveDate> {
        match self.mode {
            ViewMode::Month => {
                let first = self.reference.with_day(1).unwrap_or(self.reference);
                days_from(start_of_week(first), MONTH_GRID_CELLS)
            },
            ViewMode::Week => days_from(start_of_week(self.reference), 7),
            ViewMode::Day => vec![self.reference],
        }
    }

    /// Step back by one month, one week or one day, depending on the mode
    pub fn previous(&mut self) {
        let stepped = match self.mode {
            ViewMode::Month => self.reference.checked_sub_months(Months::new(1)),
            ViewMode::Week => self.reference.checked_sub_signed(Duration::days(7)),
            ViewMode::Day => self.reference.pred_opt(),
        };
        self.step_to(stepped);
    }

    /// Step forward by one month, one week or one day, depending on the mode
    pub fn next(&mut self) {
        let stepped = match self.mode {
            ViewMode::Month => self.reference.checked_add_months(Months::new(1)),
            ViewMode::Week => self.reference.checked_add_signed(Duration::days(7)),
            ViewMode::Day => self.reference.succ_opt(),
        };
        self.step_to(stepped);
    }

    fn step_to(&mut self, stepped: Option<NaiveDate>) {
        match stepped {
            Some(date) => self.reference = date,
            None => log::warn!("Cannot move the calendar past {}", self.reference),
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference = today;
    }

    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.reference.year() && date.month() == self.reference.month()
    }

    pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
        date == today
    }

    /// Everything needed to draw each cell of this view.
    ///
    /// Only month views de-emphasize days outside the reference month; in week and day views every cell counts as "current".
    pub fn date_cells<'a>(&self, events: &'a [Event], today: NaiveDate) -> Vec<DateCell<'a>> {
        self.cells()
            .into_iter()
            .map(|date| DateCell {
                date,
                is_current_month: self.mode != ViewMode::Month || self.is_current_month(date),
                is_today: Self::is_today(date, today),
                holiday: holidays::lookup(date),
                events: events_on_date(events, date),
            })
            .collect()
    }
}


/// The content of a single calendar cell
#[derive(Clone, Debug, PartialEq)]
pub struct DateCell<'a> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub holiday: Option<Holiday>,
    /// Events starting on this date
    pub events: Vec<&'a Event>,
}

impl<'a> DateCell<'a> {
    pub fn visible_events(&self) -> &[&'a Event] {
        let visible = self.events.len().min(MAX_VISIBLE_EVENTS);
        &self.events[..visible]
    }

    /// How many events did not fit (displayed as "+N more")
    pub fn hidden_count(&self) -> usize {
        self.events.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday.map(|h| h.is_holiday()).unwrap_or(false)
    }
}
