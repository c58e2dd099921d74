//! Appends flattened rows to the output CSV.
//!
//! The sink owns the file for the whole run: the header is written once at
//! creation and every later append shares its column order, so each row has
//! exactly one field per header column.

use std::fs::File;
use std::path::Path;

use anyhow::Result;

use crate::extract::FlattenedRow;
use crate::params::ParameterSet;

pub struct TableSink {
    writer: csv::Writer<File>,
    columns: usize,
}

impl TableSink {
    /// Create (or truncate) the file and write the header row.
    pub fn create(path: &Path, params: &ParameterSet) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        let columns = params.columns();
        writer.write_record(&columns)?;
        writer.flush()?;

        Ok(TableSink {
            writer,
            columns: columns.len(),
        })
    }

    /// Append rows in header column order, `None` as an empty field.
    /// Appending nothing is a no-op.
    pub fn append(&mut self, rows: &[FlattenedRow]) -> Result<()> {
        for row in rows {
            let mut record = Vec::with_capacity(self.columns);
            record.push(row.date.clone());
            for value in &row.values {
                record.push(value.map(|v| v.to_string()).unwrap_or_default());
            }
            self.writer.write_record(&record)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;

    fn row(date: &str, values: Vec<Option<f64>>) -> FlattenedRow {
        FlattenedRow {
            date: date.to_string(),
            values,
        }
    }

    #[test]
    fn should_write_header_once_across_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let params = ParameterSet::new(["airTemperature", "humidity"]);

        let mut sink = TableSink::create(&path, &params).unwrap();
        sink.append(&[row("2024-01-01T08:00:00+00:00", vec![Some(21.4), Some(65.0)])])
            .unwrap();
        sink.append(&[row("2024-01-02T08:00:00+00:00", vec![Some(19.8), None])])
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,airTemperature,humidity");
        assert_eq!(lines[1], "2024-01-01T08:00:00+00:00,21.4,65");
        assert_eq!(lines[2], "2024-01-02T08:00:00+00:00,19.8,");
    }

    #[test]
    fn should_treat_empty_batch_as_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let params = ParameterSet::new(["airTemperature"]);

        let mut sink = TableSink::create(&path, &params).unwrap();
        sink.append(&[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1); // header only
    }

    #[test]
    fn should_give_every_row_the_full_column_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let params = ParameterSet::new(["a", "b", "c"]);

        let mut sink = TableSink::create(&path, &params).unwrap();
        sink.append(&[row("2024-01-01T08:00:00+00:00", vec![None, Some(1.5), None])])
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 4);
        for result in reader.records() {
            assert_eq!(result.unwrap().len(), 4);
        }
    }

    #[test]
    fn should_round_trip_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let params = ParameterSet::new(["airTemperature", "humidity"]);
        let rows = vec![
            row("2024-01-01T08:00:00+00:00", vec![Some(21.4), Some(65.0)]),
            row("2024-01-02T08:00:00+00:00", vec![None, Some(70.25)]),
        ];

        let mut sink = TableSink::create(&path, &params).unwrap();
        sink.append(&rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read_back: Vec<FlattenedRow> = reader
            .records()
            .map(|r| {
                let record = r.unwrap();
                FlattenedRow {
                    date: record[0].to_string(),
                    values: record.iter().skip(1).map(|f| f.parse().ok()).collect(),
                }
            })
            .collect();

        assert_eq!(read_back, rows);
    }
}
