use crate::errors::ScheduleError;
use chrono::NaiveDate;
use getset::Getters;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static DATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").unwrap());

/// Per-visit status, persisted outside the record collection under
/// `status-<sequence number>` keys. Absent or unreadable entries read as
/// `Upcoming`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Upcoming,
    Completed,
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Upcoming => "upcoming",
            Status::Completed => "completed",
            Status::Skipped => "skipped",
        })
    }
}

impl FromStr for Status {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Status::Upcoming),
            "completed" => Ok(Status::Completed),
            "skipped" => Ok(Status::Skipped),
            other => Err(ScheduleError::UnknownStatus(other.to_string())),
        }
    }
}

/// One normalized scheduled-visit entry derived from a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[getset(get = "pub")]
    sequence_number: u32,
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    address: String,
    #[getset(get = "pub")]
    time_slot: String,
    #[getset(get = "pub")]
    verse_reference: String,
    #[getset(get = "pub")]
    verse_text: String,
    #[getset(get = "pub")]
    map_link: String,
    #[getset(get = "pub")]
    date: String,
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence_number: u32,
        name: String,
        address: String,
        time_slot: String,
        verse_reference: String,
        verse_text: String,
        map_link: String,
        date: String,
    ) -> Self {
        Record {
            sequence_number,
            name,
            address,
            time_slot,
            verse_reference,
            verse_text,
            map_link,
            date,
        }
    }

    /// Chronological value of the date field. `None` for empty or
    /// uncoercible dates, which sort after every real date.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%m/%d/%Y").ok()
    }
}

/// Normalizes a loosely-formatted date to `MM/DD/YYYY`.
///
/// Accepts 1-2 digit month/day and 2 or 4 digit years; two-digit years are
/// expanded with a `20` prefix. Anything else passes through unchanged so the
/// caller can still display it.
pub fn coerce_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let Some(caps) = DATE_LITERAL.captures(trimmed) else {
        return trimmed.to_string();
    };
    let month = &caps[1];
    let day = &caps[2];
    let mut year = caps[3].to_string();
    if year.len() == 2 {
        year = format!("20{year}");
    }
    format!("{month:0>2}/{day:0>2}/{year}")
}

/// Splits a verse cell into reference and text. Cells of the form
/// `<ref> - <text>` (hyphen, en dash, or em dash) carry both; otherwise the
/// whole cell is the reference.
pub fn split_verse(raw: &str) -> (String, String) {
    for separator in [" - ", " \u{2013} ", " \u{2014} "] {
        if let Some((reference, text)) = raw.split_once(separator) {
            return (reference.trim().to_string(), text.trim().to_string());
        }
    }
    (raw.trim().to_string(), String::new())
}
