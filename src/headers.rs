use crate::errors::ScheduleError;
use getset::Getters;
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered, case-insensitive header patterns per logical field. Evaluation is
/// pattern-major: the first pattern that matches any header wins, so a
/// higher-priority pattern beats an earlier column matched by a later one.
/// New header variants are additions to this table, not code changes.
static HEADER_PATTERNS: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| {
        patterns
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect::<Vec<_>>()
    };
    vec![
        ("sno", compile(&[r"(?i)^s\.?\s*no", r"(?i)^sno$", r"^#$"])),
        ("name", compile(&[r"(?i)^family\s*name", r"(?i)^name$"])),
        ("address", compile(&[r"(?i)^address"])),
        ("time", compile(&[r"(?i)^time\s*slot", r"(?i)^time$"])),
        ("verse", compile(&[r"(?i)^bible\s*verse", r"(?i)^verse$"])),
        ("map", compile(&[r"(?i)^(g[-\s]*map|map)"])),
        (
            "date",
            compile(&[r"(?i)^date", r"^\d{1,2}/\d{1,2}/\d{2,4}$"]),
        ),
    ]
});

/// Resolved column positions for the logical fields of a visit row.
/// `sno`, `name` and `address` are required; the rest degrade to empty
/// strings per row when their column is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct HeaderIndex {
    #[getset(get = "pub")]
    sno: usize,
    #[getset(get = "pub")]
    name: usize,
    #[getset(get = "pub")]
    address: usize,
    #[getset(get = "pub")]
    time: Option<usize>,
    #[getset(get = "pub")]
    verse: Option<usize>,
    #[getset(get = "pub")]
    map: Option<usize>,
    #[getset(get = "pub")]
    date: Option<usize>,
}

impl HeaderIndex {
    /// Maps the raw header row to column indices.
    ///
    /// # Arguments
    /// * `headers` - The first parsed row, untrimmed.
    ///
    /// # Returns
    /// The index map, or `MissingColumn` naming the first required logical
    /// field that no header matches.
    pub fn infer(headers: &[String]) -> Result<Self, ScheduleError> {
        let find = |field: &'static str| -> Option<usize> {
            let (_, patterns) = HEADER_PATTERNS.iter().find(|(name, _)| *name == field)?;
            patterns
                .iter()
                .find_map(|pattern| headers.iter().position(|h| pattern.is_match(h.trim())))
        };

        Ok(HeaderIndex {
            sno: find("sno").ok_or(ScheduleError::MissingColumn("sno"))?,
            name: find("name").ok_or(ScheduleError::MissingColumn("name"))?,
            address: find("address").ok_or(ScheduleError::MissingColumn("address"))?,
            time: find("time"),
            verse: find("verse"),
            map: find("map"),
            date: find("date"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_infer_full_header_row() -> anyhow::Result<()> {
        let index = HeaderIndex::infer(&headers(&[
            "S.No",
            "Family Name",
            "Address Line 1",
            "Time Slot",
            "Bible Verse",
            "G-Map Link",
            "Date",
        ]))?;
        assert_eq!(*index.sno(), 0);
        assert_eq!(*index.name(), 1);
        assert_eq!(*index.address(), 2);
        assert_eq!(*index.time(), Some(3));
        assert_eq!(*index.verse(), Some(4));
        assert_eq!(*index.map(), Some(5));
        assert_eq!(*index.date(), Some(6));
        Ok(())
    }

    #[test]
    fn test_infer_alternate_spellings() -> anyhow::Result<()> {
        let index = HeaderIndex::infer(&headers(&["#", "name", "ADDRESS", "12/5/25"]))?;
        assert_eq!(*index.sno(), 0);
        assert_eq!(*index.name(), 1);
        assert_eq!(*index.address(), 2);
        // a bare date literal header counts as the date column
        assert_eq!(*index.date(), Some(3));
        Ok(())
    }

    #[test]
    fn test_infer_pattern_priority_beats_column_order() -> anyhow::Result<()> {
        let index = HeaderIndex::infer(&headers(&["SNo", "Name", "Address", "Time", "Time Slot"]))?;
        assert_eq!(*index.time(), Some(4));
        Ok(())
    }

    #[test]
    fn test_infer_missing_address_fails() {
        let err = HeaderIndex::infer(&headers(&["SNo", "Name"])).unwrap_err();
        assert!(matches!(err, ScheduleError::MissingColumn("address")));
    }

    #[test]
    fn test_infer_optional_columns_degrade_to_none() -> anyhow::Result<()> {
        let index = HeaderIndex::infer(&headers(&["SNo", "Name", "Address"]))?;
        assert_eq!(*index.time(), None);
        assert_eq!(*index.verse(), None);
        assert_eq!(*index.map(), None);
        assert_eq!(*index.date(), None);
        Ok(())
    }
}
