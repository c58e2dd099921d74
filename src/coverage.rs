//! Post-hoc check that the output file covers every day of the range.
//!
//! Timestamps are parsed back to calendar dates before comparing, so a
//! formatting difference between writer and source can't produce false
//! gaps. Purely diagnostic: reads the file, reports, changes nothing.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, NaiveDate};

use crate::range::TimeRange;

/// Days of `range` with no row in the file, sorted ascending. Empty means
/// full coverage.
pub fn missing_days(path: &Path, range: &TimeRange) -> Result<Vec<NaiveDate>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut present = HashSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(day) = record.get(0).and_then(parse_day) {
            present.insert(day);
        }
    }

    let mut missing: Vec<NaiveDate> = range.days().filter(|day| !present.contains(day)).collect();
    missing.sort();

    Ok(missing)
}

/// Calendar date of a `date` column entry: RFC 3339 first, bare date as a
/// fallback. Entries that parse as neither can't satisfy any day.
fn parse_day(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.to_utc().date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("table.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,airTemperature").unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    #[test]
    fn should_report_single_missing_day() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "2024-01-01T08:00:00+00:00,21.4",
                "2024-01-03T08:00:00+00:00,20.1",
            ],
        );
        let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();

        let missing = missing_days(&path, &range).unwrap();

        assert_eq!(missing, vec![date(2024, 1, 2)]);
    }

    #[test]
    fn should_report_nothing_for_full_coverage() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "2024-01-01T08:00:00+00:00,21.4",
                "2024-01-02T08:00:00+00:00,19.8",
            ],
        );
        let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();

        assert!(missing_days(&path, &range).unwrap().is_empty());
    }

    #[test]
    fn should_match_days_across_timestamp_formats() {
        // A bare date and a zone-offset timestamp still cover their days.
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &["2024-01-01,21.4", "2024-01-02T10:00:00+02:00,19.8"]);
        let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();

        assert!(missing_days(&path, &range).unwrap().is_empty());
    }

    #[test]
    fn should_ignore_unparseable_dates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &["garbage,21.4"]);
        let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();

        assert_eq!(missing_days(&path, &range).unwrap(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn should_report_every_day_for_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &[]);
        let range = TimeRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();

        assert_eq!(missing_days(&path, &range).unwrap().len(), 3);
    }
}
