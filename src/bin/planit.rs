//! Prints the content of a planner folder
//!
//! ```text
//! planit month <folder> [YYYY-MM]
//! planit todos <folder> [all|pending|completed] [search]
//! planit member <folder> <member-id>
//! ```

use std::error::Error;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use planit::member::{FallbackDirectory, LocalMembers, RemoteDirectory};
use planit::query::{self, EventStats, TodoFilter};
use planit::traits::MemberSource;
use planit::utils::{print_event, print_member, print_month, print_todo};
use planit::{FolderStorage, LocalStore};

const USAGE: &str = "Usage:
    planit month <folder> [YYYY-MM]
    planit todos <folder> [all|pending|completed] [search]
    planit member <folder> <member-id>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let today = Local::now().date_naive();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["month", folder] => show_month(Path::new(folder), today.year(), today.month(), today),
        ["month", folder, month] => {
            let (year, month) = parse_month(month)?;
            show_month(Path::new(folder), year, month, today)
        },
        ["todos", folder, rest @ ..] => show_todos(Path::new(folder), rest),
        ["member", folder, id] => show_member(Path::new(folder), id).await,
        _ => {
            eprintln!("{}", USAGE);
            Err("invalid arguments".into())
        },
    }
}

fn parse_month(s: &str) -> Result<(i32, u32), Box<dyn Error>> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|err| format!("Invalid month {:?} (expected YYYY-MM): {}", s, err))?;
    Ok((first.year(), first.month()))
}

fn show_month(folder: &Path, year: i32, month: u32, today: NaiveDate) -> Result<(), Box<dyn Error>> {
    let store = LocalStore::new(FolderStorage::new(folder)?);
    let events = store.events();

    print_month(year, month, &events, today);

    println!();
    let stats = EventStats::compute(&events, today);
    println!("{} events, {} completed ({}%), {} today, {} this week, {} this month",
        stats.total, stats.completed, stats.completion_rate(), stats.today, stats.this_week, stats.this_month);

    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        let last = planit::calendar::last_day_of_month(year, month).unwrap_or(first);
        for event in query::events_between(&events, first, last) {
            print_event(event);
        }
    }
    Ok(())
}

fn show_todos(folder: &Path, rest: &[&str]) -> Result<(), Box<dyn Error>> {
    let (filter, search) = match rest {
        [] => (TodoFilter::All, ""),
        [filter] => (parse_filter(filter)?, ""),
        [filter, search] => (parse_filter(filter)?, *search),
        _ => return Err(USAGE.into()),
    };

    let store = LocalStore::new(FolderStorage::new(folder)?);
    let todos = store.todos();
    for todo in query::filter_todos(&todos, filter, search) {
        print_todo(todo);
    }
    Ok(())
}

fn parse_filter(s: &str) -> Result<TodoFilter, Box<dyn Error>> {
    match s {
        "all" => Ok(TodoFilter::All),
        "pending" => Ok(TodoFilter::Pending),
        "completed" => Ok(TodoFilter::Completed),
        _ => Err(format!("Unknown filter {:?}", s).into()),
    }
}

async fn show_member(folder: &Path, id: &str) -> Result<(), Box<dyn Error>> {
    let remote = RemoteDirectory::from_config()?;
    let local = LocalMembers::new(FolderStorage::new(folder)?);
    let directory = FallbackDirectory::new(remote, local);

    match directory.get_member(id).await? {
        Some(member) => print_member(&member),
        None => println!("No member {}", id),
    }
    Ok(())
}
