//! ticklist command-line front end.
//!
//! # Responsibility
//! - Forward user intents (add/list/update/delete/filter/navigate) into
//!   `TodoService` and render plain-text views.
//! - Run the reminder watcher with a platform notifier.

use std::env;
use std::io::stdin;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use ticklist_core::time::rules::{is_due_today, is_overdue, is_reminder_active};
use ticklist_core::{
    default_log_level, init_logging, remind, Clock, Committed, JsonFileStore, LogNotifier,
    MonthView, Notifier, Persistence, StatusFilter, SystemClock, Todo, TodoId, TodoPatch,
    TodoService,
};

type Service = TodoService<JsonFileStore, SystemClock>;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = data_dir();

    if let Some(log_dir) = data_dir.join("logs").to_str() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: {err}");
        }
    }

    let persistence = match JsonFileStore::open(&data_dir) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut service = TodoService::open(persistence.clone(), SystemClock);
    match run(&mut service, &persistence, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(service: &mut Service, persistence: &JsonFileStore, args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "add" => run_add(service, rest),
        "list" => run_list(service, rest),
        "done" => run_set_completed(service, rest, true),
        "undone" => run_set_completed(service, rest, false),
        "edit" => run_edit(service, rest),
        "rm" => run_remove(service, rest),
        "clear" => {
            let committed = service.clear_completed();
            report_warning(&committed);
            println!("cleared {} completed todo(s)", committed.value.len());
            Ok(())
        }
        "day" => run_day(service, rest),
        "month" => run_month(service, rest),
        "profile" => run_profile(service, rest),
        "watch" => run_watch(persistence, rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}

fn run_add(service: &mut Service, rest: &[String]) -> Result<(), String> {
    let mut text_parts: Vec<&str> = Vec::new();
    let mut due_date = None;
    let mut reminder = None;
    let mut photo = None;

    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--due" => {
                let value = iter.next().ok_or("--due needs a YYYY-MM-DD value")?;
                due_date = Some(parse_date(value)?);
            }
            "--remind" => {
                let value = iter.next().ok_or("--remind needs a date-time value")?;
                reminder = Some(parse_datetime(value)?);
            }
            "--photo" => {
                let value = iter.next().ok_or("--photo needs a value")?;
                photo = Some(value.clone());
            }
            _ => text_parts.push(arg),
        }
    }

    let text = text_parts.join(" ");
    let committed = service
        .create(&text, due_date, reminder, photo)
        .map_err(|err| err.to_string())?;
    report_warning(&committed);
    println!("added #{}: {}", committed.value.id, committed.value.text);
    Ok(())
}

fn run_list(service: &mut Service, rest: &[String]) -> Result<(), String> {
    if let Some(raw) = rest.first() {
        let filter = StatusFilter::parse(raw)
            .ok_or_else(|| format!("unknown filter `{raw}`; expected all|active|completed|today|overdue"))?;
        service.set_filter(filter);
    }

    let todos = service.filtered_todos();
    if todos.is_empty() {
        println!("no todos found");
    } else {
        let now = SystemClock.now();
        for todo in &todos {
            println!("{}", render_line(todo, now));
        }
    }
    println!(
        "{} item(s) left [filter: {}]",
        service.active_count(),
        service.filter().as_str()
    );
    Ok(())
}

fn run_set_completed(service: &mut Service, rest: &[String], completed: bool) -> Result<(), String> {
    let id = parse_id(rest)?;
    let patch = TodoPatch::default().with_completed(completed);
    let committed = service.update(id, patch).map_err(|err| err.to_string())?;
    report_warning(&committed);
    let state = if completed { "done" } else { "open" };
    println!("#{} is now {state}: {}", committed.value.id, committed.value.text);
    Ok(())
}

fn run_edit(service: &mut Service, rest: &[String]) -> Result<(), String> {
    let id = parse_id(rest)?;
    let text = rest[1..].join(" ");
    if text.is_empty() {
        return Err("edit needs the new text".to_string());
    }
    let patch = TodoPatch::default().with_text(text);
    let committed = service.update(id, patch).map_err(|err| err.to_string())?;
    report_warning(&committed);
    println!("updated #{}: {}", committed.value.id, committed.value.text);
    Ok(())
}

fn run_remove(service: &mut Service, rest: &[String]) -> Result<(), String> {
    let id = parse_id(rest)?;
    let committed = service.delete(id).map_err(|err| err.to_string())?;
    report_warning(&committed);
    println!("removed #{}: {}", committed.value.id, committed.value.text);
    Ok(())
}

fn run_day(service: &mut Service, rest: &[String]) -> Result<(), String> {
    let raw = rest.first().ok_or("day needs a YYYY-MM-DD value")?;
    let date = parse_date(raw)?;
    service.select_date(date);

    let todos = service.selected_date_todos();
    if todos.is_empty() {
        println!("no todos for {date}");
        return Ok(());
    }
    let now = SystemClock.now();
    for todo in &todos {
        println!("{}", render_line(todo, now));
    }
    Ok(())
}

fn run_month(service: &mut Service, rest: &[String]) -> Result<(), String> {
    let delta = match rest.first() {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| format!("invalid month delta `{raw}`"))?,
        None => 0,
    };
    print_month(&service.navigate_month(delta));
    Ok(())
}

fn run_profile(service: &mut Service, rest: &[String]) -> Result<(), String> {
    match rest.first() {
        Some(name) => {
            let committed = service.set_username(name);
            report_warning(&committed);
            println!("profile saved for: {}", service.profile().username);
        }
        None => {
            let profile = service.profile();
            if profile.username.is_empty() {
                println!("no profile name set");
            } else {
                println!("{}", profile.username);
            }
        }
    }
    Ok(())
}

fn run_watch(persistence: &JsonFileStore, rest: &[String]) -> Result<(), String> {
    let interval_secs = match rest.first() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("invalid interval `{raw}`"))?,
        None => 60,
    };

    // Reload the document each tick so edits from other invocations are seen.
    let store = persistence.clone();
    let snapshot = move || {
        store.load_todos().unwrap_or_else(|err| {
            warn!("event=watch_load_failed module=cli detail={err}");
            Vec::new()
        })
    };

    let handle = remind::spawn(
        Duration::from_secs(interval_secs),
        snapshot,
        SystemClock,
        watch_notifier(),
    );
    println!("watching reminders every {interval_secs}s; press Enter to stop");
    let mut line = String::new();
    let _ = stdin().read_line(&mut line);
    handle.stop();
    Ok(())
}

fn render_line(todo: &Todo, now: NaiveDateTime) -> String {
    let marker = if todo.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{marker} #{} {}", todo.id, todo.text);

    if let Some(due_date) = todo.due_date {
        if is_overdue(todo, now) {
            line.push_str(&format!("  due {due_date} (overdue)"));
        } else if is_due_today(todo, now) {
            line.push_str("  due today");
        } else {
            line.push_str(&format!("  due {due_date}"));
        }
    }
    if let Some(reminder) = todo.reminder {
        if is_reminder_active(todo, now) {
            line.push_str(&format!("  reminder {reminder} (elapsed)"));
        } else if !todo.completed {
            line.push_str(&format!("  reminder {reminder}"));
        }
    }
    if todo.photo.is_some() {
        line.push_str("  [photo]");
    }
    line
}

fn print_month(view: &MonthView) {
    println!("{}-{:02}", view.year, view.month);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");

    let mut cells: Vec<String> = vec!["    ".to_string(); view.leading_weekday as usize];
    for day in 1..=view.days_in_month() {
        let mark = if view.count_on(day) > 0 { '*' } else { ' ' };
        cells.push(format!(" {day:>2}{mark}"));
    }
    for week in cells.chunks(7) {
        println!("{}", week.concat());
    }

    for day in 1..=view.days_in_month() {
        let count = view.count_on(day);
        if count > 0 {
            println!("  {}-{:02}-{day:02}: {count} due", view.year, view.month);
        }
    }
}

fn report_warning<T>(committed: &Committed<T>) {
    if let Some(warning) = &committed.persist_warning {
        eprintln!("warning: changes kept in memory but not saved: {warning}");
    }
}

fn parse_id(rest: &[String]) -> Result<TodoId, String> {
    let raw = rest.first().ok_or("missing todo id")?;
    raw.parse::<TodoId>()
        .map_err(|_| format!("invalid todo id `{raw}`"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    Err(format!(
        "invalid date-time `{value}`; expected YYYY-MM-DD HH:MM"
    ))
}

fn data_dir() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            env::var_os("HOME")
                .map(PathBuf::from)
                .map(|home| home.join(".config"))
                .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        });
    base.join("ticklist")
}

#[cfg(unix)]
fn watch_notifier() -> DesktopNotifier {
    DesktopNotifier
}

#[cfg(not(unix))]
fn watch_notifier() -> LogNotifier {
    LogNotifier
}

/// Desktop notification with a log fallback when the daemon is unreachable.
#[cfg(unix)]
struct DesktopNotifier;

#[cfg(unix)]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .is_err()
        {
            warn!("event=notify_failed module=cli fallback=log");
            LogNotifier.notify(title, body);
        }
    }
}

fn print_usage() {
    println!("ticklist {}", ticklist_core::core_version());
    println!();
    println!("usage: ticklist <command> [args]");
    println!();
    println!("  add <text> [--due YYYY-MM-DD] [--remind \"YYYY-MM-DD HH:MM\"] [--photo REF]");
    println!("  list [all|active|completed|today|overdue]");
    println!("  done <id> | undone <id>");
    println!("  edit <id> <text>");
    println!("  rm <id>");
    println!("  clear");
    println!("  day <YYYY-MM-DD>");
    println!("  month [delta]");
    println!("  profile [name]");
    println!("  watch [interval-secs]");
}
