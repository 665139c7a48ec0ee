use crate::{
    headers::HeaderIndex,
    models::{Record, coerce_date, split_verse},
    tokenizer::parse_csv,
};
use anyhow::Result;
use chrono::NaiveDate;
use getset::Getters;
use tracing::{debug, warn};

/// Label for the group of records whose date field is empty.
pub const UNDATED_LABEL: &str = "Undated";

/// The full outcome of one parse: sorted records plus a count of the rows
/// that were dropped for lacking a usable sequence number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Schedule {
    #[getset(get = "pub")]
    records: Vec<Record>,
    #[getset(get = "pub")]
    dropped_rows: usize,
}

/// Consecutive records sharing the exact same date string, in sort order.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DateGroup {
    #[getset(get = "pub")]
    label: String,
    #[getset(get = "pub")]
    records: Vec<Record>,
}

impl Schedule {
    /// Runs the whole pipeline on raw spreadsheet text: tokenize, infer the
    /// header row, map data rows to records, then sort by date ascending
    /// (unparsable and empty dates last) with sequence number as tie-break.
    ///
    /// # Arguments
    /// * `text` - Raw pasted CSV, headers in arbitrary order and casing.
    ///
    /// # Returns
    /// The parsed schedule, or an error when a required column is missing.
    /// Input with no rows at all yields an empty schedule.
    pub fn from_csv(text: &str) -> Result<Schedule> {
        let rows = parse_csv(text);
        let Some((header_row, data_rows)) = rows.split_first() else {
            return Ok(Schedule::default());
        };

        let headers: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();
        let index = HeaderIndex::infer(&headers)?;

        let mut records = Vec::new();
        let mut dropped_rows = 0usize;
        for row in data_rows {
            match map_row(row, &index) {
                Some(record) => records.push(record),
                None => {
                    dropped_rows += 1;
                    warn!(?row, "dropping row without a usable sequence number");
                }
            }
        }

        records.sort_by_key(|record| {
            (
                record.date_value().unwrap_or(NaiveDate::MAX),
                *record.sequence_number(),
            )
        });
        debug!(
            records = records.len(),
            dropped = dropped_rows,
            "mapped spreadsheet input"
        );

        Ok(Schedule {
            records,
            dropped_rows,
        })
    }

    /// Groups the sorted records by exact date-string equality, preserving
    /// the sort's order of groups and of records within a group. Records
    /// with an empty date land under [`UNDATED_LABEL`].
    pub fn groups(&self) -> Vec<DateGroup> {
        let mut groups: Vec<DateGroup> = Vec::new();
        for record in &self.records {
            let label = if record.date().is_empty() {
                UNDATED_LABEL.to_string()
            } else {
                record.date().clone()
            };
            match groups.iter_mut().find(|group| group.label == label) {
                Some(group) => group.records.push(record.clone()),
                None => groups.push(DateGroup {
                    label,
                    records: vec![record.clone()],
                }),
            }
        }
        groups
    }

    /// Serializes the record collection to a pretty-printed JSON array of
    /// flat camelCase objects, preserving sort order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

/// Maps one data row to a record, or `None` for rows that should be dropped:
/// empty rows and rows whose sequence-number field has no digits or reads as
/// zero (stray header repeats and blanks).
fn map_row(row: &[String], index: &HeaderIndex) -> Option<Record> {
    if row.is_empty() {
        return None;
    }
    let cell = |at: usize| row.get(at).map(|value| value.trim()).unwrap_or("");
    let optional = |at: Option<usize>| at.map(|i| cell(i).to_string()).unwrap_or_default();

    let digits: String = cell(*index.sno())
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let sequence_number: u32 = digits.parse().ok().filter(|n| *n > 0)?;

    let (verse_reference, verse_text) = split_verse(&optional(*index.verse()));
    Some(Record::new(
        sequence_number,
        cell(*index.name()).to_string(),
        cell(*index.address()).to_string(),
        optional(*index.time()),
        verse_reference,
        verse_text,
        optional(*index.map()),
        coerce_date(&optional(*index.date())),
    ))
}
