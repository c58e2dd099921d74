//! Day-granularity date ranges and their partitioning into request chunks.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(anyhow!("invalid range: {} is after {}", start, end));
        }
        Ok(TimeRange { start, end })
    }

    /// Range ending today (UTC) and starting `years` years earlier.
    pub fn last_years(years: i32) -> Self {
        let end = Utc::now().date_naive();
        let start = end
            .with_year(end.year() - years)
            .unwrap_or(end - Duration::days(365 * years as i64));

        TimeRange { start, end }
    }

    /// Number of days in the range, inclusive of both endpoints.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every calendar day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.num_days() as usize)
    }
}

/// A contiguous sub-range of days fetched by one API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Partition `range` into at most `max_requests` contiguous chunks.
///
/// Chunk length is the ceiling of `total_days / max_requests`, so the final
/// chunk is clamped to the range end and the planner may return fewer chunks
/// than requested.
pub fn plan_chunks(range: &TimeRange, max_requests: usize) -> Vec<Chunk> {
    let max_requests = max_requests.max(1);
    let total_days = range.num_days();
    let days_per_chunk = (total_days + max_requests as i64 - 1) / max_requests as i64;

    let mut chunks = Vec::new();
    for i in 0..max_requests {
        let start = range.start + Duration::days(i as i64 * days_per_chunk);
        if start > range.end {
            break;
        }

        let mut end = start + Duration::days(days_per_chunk - 1);
        if end > range.end {
            end = range.end;
        }

        chunks.push(Chunk {
            index: i,
            start,
            end,
        });
    }

    chunks
}

// -- Tests -------------------------------------------------------------------
