use crate::models::Status;
use crate::schedule::Schedule;
use crate::store::status_of;
use crate::traits::StatusStore;
use getset::Getters;
use std::fmt::Write;

/// Per-status counts across a whole schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct StatusTotals {
    #[getset(get = "pub")]
    upcoming: usize,
    #[getset(get = "pub")]
    completed: usize,
    #[getset(get = "pub")]
    skipped: usize,
}

pub fn totals(schedule: &Schedule, store: &impl StatusStore) -> StatusTotals {
    let mut totals = StatusTotals::default();
    for record in schedule.records() {
        match status_of(store, *record.sequence_number()) {
            Status::Upcoming => totals.upcoming += 1,
            Status::Completed => totals.completed += 1,
            Status::Skipped => totals.skipped += 1,
        }
    }
    totals
}

/// Renders the schedule as date-grouped text sections, each record annotated
/// with its current status, followed by a totals footer.
pub fn render_text(schedule: &Schedule, store: &impl StatusStore) -> String {
    let mut out = String::new();
    for group in schedule.groups() {
        let _ = writeln!(out, "== {} ==", group.label());
        for record in group.records() {
            let status = status_of(store, *record.sequence_number());
            let _ = writeln!(
                out,
                "{}. {} [{}]",
                record.sequence_number(),
                record.name(),
                status.to_string().to_uppercase()
            );
            let _ = writeln!(out, "   Address: {}", record.address());
            if !record.time_slot().is_empty() {
                let _ = writeln!(out, "   Time: {}", record.time_slot());
            }
            if !record.verse_reference().is_empty() {
                if record.verse_text().is_empty() {
                    let _ = writeln!(out, "   Verse: {}", record.verse_reference());
                } else {
                    let _ = writeln!(
                        out,
                        "   Verse: {} - {}",
                        record.verse_reference(),
                        record.verse_text()
                    );
                }
            }
            if !record.map_link().is_empty() {
                let _ = writeln!(out, "   Map: {}", record.map_link());
            }
        }
        out.push('\n');
    }

    let totals = totals(schedule, store);
    let _ = writeln!(
        out,
        "Totals: Completed: {} | Upcoming: {} | Skipped: {}",
        totals.completed, totals.upcoming, totals.skipped
    );
    out
}
