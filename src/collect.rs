//! The acquisition pipeline: plan chunks, fetch each one, keep the target
//! hour, flatten, append, then verify coverage.
//!
//! Strictly sequential: one request in flight at a time, with a fixed pause
//! between chunks to stay inside the API's daily request budget. A failed
//! chunk contributes zero rows and the run carries on; only a missing
//! credential (enforced upstream, a `SourceClient` cannot be built without
//! a key) or an output-file error aborts a run.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;

use crate::cli::create_progress_bar;
use crate::coverage;
use crate::extract::{at_hour, flatten};
use crate::params::ParameterSet;
use crate::range::{plan_chunks, TimeRange};
use crate::sink::TableSink;
use crate::source::{PointQuery, PointSource};

/// Pause between chunk requests.
const CHUNK_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

pub struct Collector<S> {
    source: S,
    params: ParameterSet,
    location: Location,
    target_hour: u32,
    chunk_pause: Duration,
}

/// What a run achieved, for the final report.
#[derive(Debug)]
pub struct RunSummary {
    pub total_days: i64,
    pub days_fetched: usize,
    pub chunks: usize,
    pub missing: Vec<NaiveDate>,
}

impl<S: PointSource> Collector<S> {
    pub fn new(source: S, params: ParameterSet, location: Location, target_hour: u32) -> Self {
        Collector {
            source,
            params,
            location,
            target_hour,
            chunk_pause: CHUNK_PAUSE,
        }
    }

    /// Override the inter-chunk pause (tests run with zero).
    pub fn with_chunk_pause(mut self, pause: Duration) -> Self {
        self.chunk_pause = pause;
        self
    }

    /// Collect `range` into `output` using at most `max_requests` API
    /// calls, then verify calendar coverage of the written file.
    pub async fn run(
        &self,
        range: &TimeRange,
        max_requests: usize,
        output: &Path,
    ) -> Result<RunSummary> {
        let chunks = plan_chunks(range, max_requests);

        println!("Total days to fetch: {}", range.num_days());
        println!("API requests needed: {}", chunks.len());

        let mut sink = TableSink::create(output, &self.params)?;
        let mut days_fetched = 0;

        let pb = create_progress_bar(chunks.len() as u64, "Fetching chunks".to_string());

        for chunk in &chunks {
            pb.println(format!(
                "Request {}/{}: {} to {}",
                chunk.index + 1,
                chunks.len(),
                chunk.start,
                chunk.end
            ));

            let query =
                PointQuery::for_chunk(self.location.lat, self.location.lng, &self.params, chunk);

            let records = match self.source.fetch(&query).await {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("  - Chunk {} failed, skipping: {}", chunk.index + 1, e);
                    Vec::new()
                }
            };

            let rows = flatten(&at_hour(records, self.target_hour), &self.params);
            if rows.is_empty() {
                pb.println("  - No observations for this chunk");
            } else {
                pb.println(format!("  - Retrieved {} observations", rows.len()));
            }

            sink.append(&rows)?;
            days_fetched += rows.len();
            pb.inc(1);

            if chunk.index + 1 < chunks.len() {
                tokio::time::sleep(self.chunk_pause).await;
            }
        }

        pb.finish_with_message("Fetch complete");

        let missing = coverage::missing_days(output, range)?;

        Ok(RunSummary {
            total_days: range.num_days(),
            days_fetched,
            chunks: chunks.len(),
            missing,
        })
    }
}

// -- Tests -------------------------------------------------------------------
