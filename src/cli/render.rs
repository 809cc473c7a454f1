//! Plain-text output for client commands

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::api::{LeaderboardRow, UserProfile};
use crate::client::YearCalendar;
use crate::tracking::leaderboard::average;

use super::errors::CliResult;

const WEEKDAY_HEADER: &str = "  Mo Tu We Th Fr Sa Su";

/// Write `text` to stdout and flush
pub fn write_output(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

pub fn profile(user: &UserProfile) -> String {
    format!(
        "{} (@{})\nuser id: {}\n",
        user.display_name, user.username, user.user_id
    )
}

/// Ranked table; rows are printed in the order given
pub fn leaderboard(title: &str, rows: &[LeaderboardRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    if rows.is_empty() {
        out.push_str("  (nobody yet)\n");
        return out;
    }

    let name_width = rows
        .iter()
        .map(|r| r.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("name".len());

    let _ = writeln!(
        out,
        "  {:>3}  {:<width$}  {:>10}  {:>10}  {:>7}  {:>11}",
        "#",
        "name",
        "drink days",
        "total days",
        "average",
        "total score",
        width = name_width
    );

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  {:<width$}  {:>10}  {:>10}  {:>7.2}  {:>11}",
            i + 1,
            row.display_name,
            row.drink_days,
            row.total_days,
            average(row),
            row.total_score,
            width = name_width
        );
    }

    out
}

/// Cell text: two-wide level, ` .` for an unrecorded day, blank outside
/// the month
fn cell(level: Option<Option<i32>>) -> String {
    match level {
        Some(Some(level)) if level > 99 => "++".to_string(),
        Some(Some(level)) => format!("{:>2}", level),
        Some(None) => " .".to_string(),
        None => "  ".to_string(),
    }
}

pub fn calendar(owner: &str, calendar: &YearCalendar) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {} ({} days recorded)",
        owner,
        calendar.year,
        calendar.recorded_days()
    );

    for month in &calendar.months {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", month.name);
        let _ = writeln!(out, "{}", WEEKDAY_HEADER);

        for week in &month.weeks {
            let cells: Vec<String> = week
                .days
                .iter()
                .map(|day| cell(day.as_ref().map(|d| d.level)))
                .collect();
            let _ = writeln!(out, "  {}", cells.join(" ").trim_end());
        }
    }

    out
}
