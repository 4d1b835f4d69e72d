//! Some utility functions

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarView, DateCell, ViewMode};
use crate::event::Event;
use crate::member::Member;
use crate::todo::Todo;

/// A debug utility that pretty-prints an event
pub fn print_event(event: &Event) {
    println!("    {}", format_event(event));
}

pub fn format_event(event: &Event) -> String {
    let completion = if event.completed() { "✓" } else { " " };
    let time = match event.start_time() {
        Some(time) => time.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    };
    let reminder = match event.reminder_date_time() {
        Some(at) => format!(" (reminder at {})", at.format("%Y-%m-%d %H:%M")),
        None => String::new(),
    };
    format!("{} {} {} {}\t{}{}", completion, event.start_date(), time, event.title(), event.id(), reminder)
}

/// A debug utility that pretty-prints a todo
pub fn print_todo(todo: &Todo) {
    let completion = if todo.completed() { "✓" } else { " " };
    let title = if todo.title().is_empty() { todo.content() } else { todo.title() };
    println!("    {} {}\t{}", completion, title, todo.id());
}

pub fn print_member(member: &Member) {
    println!("{} ({})", member.display_name(), member.id);
    let fields = [
        ("email", &member.email),
        ("phone", &member.phone),
        ("address", &member.address),
        ("google", &member.google_email),
        ("since", &member.created_at),
    ];
    for (label, value) in fields.iter() {
        if let Some(value) = value {
            println!("    {}: {}", label, value);
        }
    }
}

/// Renders one week per line. Days outside the month are dimmed with brackets, holidays get a `*`, and the event count of each day is shown after a `+`
pub fn format_month(year: i32, month: u32, events: &[Event], today: NaiveDate) -> Option<String> {
    let reference = NaiveDate::from_ymd_opt(year, month, 1)?;
    let view = CalendarView::new(reference, ViewMode::Month);
    let cells = view.date_cells(events, today);

    let mut out = format!("{:^56}\n", reference.format("%B %Y").to_string());
    out.push_str("  Sun     Mon     Tue     Wed     Thu     Fri     Sat\n");
    for week in cells.chunks(7) {
        let line: Vec<String> = week.iter().map(format_cell).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    Some(out)
}

fn format_cell(cell: &DateCell) -> String {
    let day = if cell.is_current_month {
        format!(" {:>2}", cell.date.day())
    } else {
        format!("[{:>2}]", cell.date.day())
    };
    let today = if cell.is_today { ">" } else { " " };
    let holiday = if cell.is_holiday() { "*" } else { " " };
    let count = match cell.events.len() {
        0 => "  ".to_string(),
        n => format!("+{}", n.min(9)),
    };
    format!("{}{}{}{}", today, day, holiday, count)
}

/// A debug utility that pretty-prints a month
pub fn print_month(year: i32, month: u32, events: &[Event], today: NaiveDate) {
    match format_month(year, month, events, today) {
        Some(rendered) => print!("{}", rendered),
        None => log::warn!("Invalid month {}-{}", year, month),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::event::NewEvent;
    use crate::item::ItemId;
    use crate::traits::Record;

    #[test]
    fn month_rendering() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let events = vec![Event::create(NewEvent::new("Chuseok dinner", day, day), ItemId::random(), Utc::now())];
        let rendered = format_month(2025, 10, &events, day).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        // Header, weekday names, and 6 weeks
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("October 2025"));
        // October 1st 2025 is a Wednesday
        assert!(lines[2].starts_with(" [28]"));
        assert!(rendered.contains(">  6*+1"));
        assert!(format_month(2025, 13, &events, day).is_none());
    }
}
