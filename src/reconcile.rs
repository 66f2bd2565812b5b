//! Period and date reconciliation against the league's season bounds.
//!
//! Fantrax renders dates for humans: game days drop the year (`"Thu 4/17"`),
//! trade timestamps carry a time-zone marker where the year would be
//! (`"Apr 12, 10:30 AM EDT"`), and periods are identified by captions and
//! textual ranges. A season spans two calendar years, so every year-less
//! value is tried against both the season-start and season-end year and only
//! a candidate inside the season is accepted. Nothing is ever clamped.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{FantraxError, Result};

#[cfg(test)]
mod tests;

/// Inclusive season boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SeasonBounds {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Season-start year first, then season-end year.
    fn candidate_years(&self) -> [i32; 2] {
        [self.start.year(), self.end.year()]
    }
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Drop a leading weekday token (`"Thu 4/17"` -> `"4/17"`).
///
/// The weekday is redundant with the date and is ignored rather than
/// validated.
pub fn strip_weekday(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.split_once(' ') {
        Some((head, rest)) if WEEKDAYS.iter().any(|w| head.eq_ignore_ascii_case(w)) => {
            rest.trim_start()
        }
        _ => trimmed,
    }
}

/// Resolve a year-less `M/D` game-day label (optionally prefixed by a weekday).
pub fn resolve_day_label(label: &str, bounds: &SeasonBounds) -> Result<NaiveDate> {
    let (month, day) = parse_month_day(strip_weekday(label))
        .ok_or_else(|| FantraxError::malformed("game day", format!("unrecognized label {label:?}")))?;

    bounds
        .candidate_years()
        .into_iter()
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|d| bounds.contains_date(*d))
        .ok_or_else(|| FantraxError::date_not_in_season(label))
}

fn parse_month_day(text: &str) -> Option<(u32, u32)> {
    let (month, day) = text.trim().split_once('/')?;
    Some((month.trim().parse().ok()?, day.trim().parse().ok()?))
}

/// Resolve a timestamp whose trailing zone marker stands in for the year,
/// e.g. `"Apr 12, 10:30 AM EDT"`.
pub fn resolve_marked_timestamp(text: &str, bounds: &SeasonBounds) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    let body = match trimmed.rsplit_once(' ') {
        Some((body, marker)) if marker.chars().all(|c| c.is_ascii_alphabetic()) => body,
        _ => {
            return Err(FantraxError::malformed(
                "timestamp",
                format!("missing year marker in {text:?}"),
            ))
        }
    };

    let mut parsed_any = false;
    let mut parse_err = None;
    for year in bounds.candidate_years() {
        match NaiveDateTime::parse_from_str(&format!("{body} {year}"), "%b %d, %I:%M %p %Y") {
            Ok(ts) if bounds.contains(ts) => return Ok(ts),
            Ok(_) => parsed_any = true,
            Err(e) => parse_err = Some(e),
        }
    }

    match (parsed_any, parse_err) {
        (false, Some(e)) => Err(e.into()),
        _ => Err(FantraxError::date_not_in_season(text)),
    }
}

/// Transaction timestamps: `"Sat Apr 12, 2025, 10:30AM"`.
pub fn parse_transaction_timestamp(text: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(
        strip_weekday(text),
        "%b %d, %Y, %I:%M%p",
    )?)
}

/// Scoring period names: `"(Oct 7/24 - Oct 13/24)"`.
pub fn parse_period_name(name: &str) -> Result<(NaiveDate, NaiveDate)> {
    let (start, end) = split_range(name, "scoring period name")?;
    Ok((
        NaiveDate::parse_from_str(start, "%b %d/%y")?,
        NaiveDate::parse_from_str(end, "%b %d/%y")?,
    ))
}

/// Result sub-captions: `"(Mon Apr 07, 2025 - Thu Apr 17, 2025)"`.
pub fn parse_caption_range(sub_caption: &str) -> Result<(NaiveDate, NaiveDate)> {
    let (start, end) = split_range(sub_caption, "period sub-caption")?;
    Ok((
        NaiveDate::parse_from_str(strip_weekday(start), "%b %d, %Y")?,
        NaiveDate::parse_from_str(strip_weekday(end), "%b %d, %Y")?,
    ))
}

fn split_range<'a>(text: &'a str, context: &str) -> Result<(&'a str, &'a str)> {
    let inner = text
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');
    inner
        .split_once(" - ")
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| FantraxError::malformed(context, format!("no date range in {text:?}")))
}

/// Canonical range key: `"2024-10-21 - 2024-10-27"`.
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

/// Day label used by the daily period list: `"Oct 4"`, `"Oct 14"`.
pub fn day_label_key(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Split a daily period list entry `"12 (Fri Oct 4)"` into `(12, "Oct 4")`.
pub fn parse_period_list_entry(entry: &str) -> Option<(u32, String)> {
    let (number, label) = entry.trim().split_once(' ')?;
    let number = number.parse().ok()?;
    let label = label.trim().trim_start_matches('(').trim_end_matches(')');
    Some((number, strip_weekday(label).to_string()))
}
