//! Storm Glass point-weather API client.
//!
//! One request fetches the hourly series for a chunk of days. The API is
//! rate limited per key per day: a 429 response is never surfaced as an
//! error, the client just waits out a fixed cooldown and retries the same
//! request until it gets a definitive answer.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::ParameterSet;
use crate::range::Chunk;

const BASE_URL: &str = "https://api.stormglass.io/v2";

/// Cooldown after a 429 before retrying the identical request.
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One point query over a closed epoch-second window.
#[derive(Debug, Clone, PartialEq)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
    pub params: String,
    pub start: i64,
    pub end: i64,
}

impl PointQuery {
    /// Query covering a chunk from midnight on its first day to the last
    /// second of its final day, UTC.
    pub fn for_chunk(lat: f64, lng: f64, params: &ParameterSet, chunk: &Chunk) -> Self {
        let start = chunk.start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let end = chunk.end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();

        PointQuery {
            lat,
            lng,
            params: params.query_string(),
            start,
            end,
        }
    }
}

/// One hourly record as returned by the API: a timestamp plus, per
/// parameter, either a scalar or a map of source-model name to value.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyRecord {
    pub time: Option<String>,
    #[serde(flatten)]
    pub values: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PointResponse {
    #[serde(default)]
    hours: Vec<HourlyRecord>,
}

/// Seam between the orchestrator and the network, so runs can be driven by
/// a scripted source in tests.
pub trait PointSource {
    async fn fetch(&self, query: &PointQuery) -> Result<Vec<HourlyRecord>, FetchError>;
}

/// HTTP client for the Storm Glass point endpoint.
pub struct SourceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    cooldown: Duration,
}

enum Attempt {
    Records(Vec<HourlyRecord>),
    RateLimited,
}

impl SourceClient {
    /// `timeout` bounds each individual network attempt.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(SourceClient {
            http,
            base_url: BASE_URL.to_string(),
            api_key,
            cooldown: RATE_LIMIT_COOLDOWN,
        })
    }

    async fn attempt(&self, query: &PointQuery) -> Result<Attempt, FetchError> {
        #[derive(Serialize)]
        struct QueryArgs<'a> {
            lat: f64,
            lng: f64,
            params: &'a str,
            start: i64,
            end: i64,
        }

        let response = self
            .http
            .get(format!("{}/weather/point", self.base_url))
            .header("Authorization", &self.api_key)
            .query(&QueryArgs {
                lat: query.lat,
                lng: query.lng,
                params: &query.params,
                start: query.start,
                end: query.end,
            })
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Ok(Attempt::RateLimited);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: PointResponse = serde_json::from_str(&body)?;
        Ok(Attempt::Records(decoded.hours))
    }
}

impl PointSource for SourceClient {
    async fn fetch(&self, query: &PointQuery) -> Result<Vec<HourlyRecord>, FetchError> {
        fetch_with_retry(|| self.attempt(query), self.cooldown).await
    }
}

/// Retry an attempt until it yields records or fails with a non-rate-limit
/// error. Unbounded: the call blocks for as long as the API keeps answering
/// 429. The cooldown is injected so tests run without real delays.
async fn fetch_with_retry<F, Fut>(
    mut attempt: F,
    cooldown: Duration,
) -> Result<Vec<HourlyRecord>, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt, FetchError>>,
{
    loop {
        match attempt().await? {
            Attempt::Records(records) => return Ok(records),
            Attempt::RateLimited => {
                println!(
                    "Rate limit exceeded, sleeping {}s before retrying",
                    cooldown.as_secs()
                );
                tokio::time::sleep(cooldown).await;
            }
        }
    }
}

// -- Tests -------------------------------------------------------------------
