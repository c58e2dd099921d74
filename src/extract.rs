//! Reduces an hourly API series to one flat row per day.
//!
//! Two steps: keep only the record at the target UTC hour, then collapse
//! each parameter's per-model value map down to the `sg` (Storm Glass
//! normalized) scalar.

use chrono::{DateTime, Timelike};
use serde_json::Value;

use crate::params::ParameterSet;
use crate::source::HourlyRecord;

/// One persisted observation: the source timestamp plus one optional scalar
/// per parameter, positionally aligned with the `ParameterSet`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedRow {
    pub date: String,
    pub values: Vec<Option<f64>>,
}

/// Keep only records whose UTC hour equals `target_hour`, preserving order.
/// Records with a missing or unparseable timestamp are dropped.
pub fn at_hour(records: Vec<HourlyRecord>, target_hour: u32) -> Vec<HourlyRecord> {
    records
        .into_iter()
        .filter(|record| {
            record
                .time
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.to_utc().hour() == target_hour)
                .unwrap_or(false)
        })
        .collect()
}

/// Flatten each record to one row. Total over any record shape: a missing
/// or unrecognized parameter value becomes `None`, never a dropped column.
pub fn flatten(records: &[HourlyRecord], params: &ParameterSet) -> Vec<FlattenedRow> {
    records
        .iter()
        .map(|record| FlattenedRow {
            date: record.time.clone().unwrap_or_default(),
            values: params
                .names()
                .iter()
                .map(|name| scalar_value(record.values.get(name)))
                .collect(),
        })
        .collect()
}

fn scalar_value(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Object(models)) => models.get("sg").and_then(Value::as_f64),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

// -- Tests -------------------------------------------------------------------
