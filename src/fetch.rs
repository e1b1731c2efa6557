//! Fetch-collaborator interface and JSON sample ingestion.
//!
//! The HTTP/caching layer itself lives outside this crate; the dashboard
//! talks to it through [`SampleFetcher`]. Responses are JSON arrays of
//! either `{"step": .., "wallTime": .., "value": ..}` objects or the older
//! `[wall_time, step, value]` triples; ingestion normalizes both, dropping
//! malformed records instead of failing the batch.

use serde::Deserialize;
use thiserror::Error;

use crate::data::sample::ScalarSample;

/// Failure modes of a sample fetch. All of them are retried on the next
/// poll interval; none of them tear down a chart.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One successful poll result.
#[derive(Debug, Clone, Default)]
pub struct FetchBatch {
    /// New samples at or after the requested cursor. May be empty.
    pub samples: Vec<ScalarSample>,
    /// Server-reported run status: `true` once the run stopped logging,
    /// which lets the poller wind down without a user toggle.
    pub finished: bool,
}

/// Source of scalar samples for a (run, tag) pair.
///
/// Implementations are called from poll worker threads and must be cheap to
/// share. `start_step` is an incremental cursor: when set, only samples with
/// a strictly greater step are wanted (returning overlap is harmless, the
/// store deduplicates).
pub trait SampleFetcher: Send + Sync {
    fn fetch(
        &self,
        run: &str,
        tag: &str,
        start_step: Option<u64>,
    ) -> Result<FetchBatch, FetchError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Object {
        step: Option<i64>,
        #[serde(rename = "wallTime", alias = "wall_time")]
        wall_time: Option<f64>,
        value: Option<f64>,
    },
    Triple([f64; 3]),
}

impl RawRecord {
    /// Validate one record, `None` when it is unusable.
    fn into_sample(self) -> Option<ScalarSample> {
        let (step, wall_time, value) = match self {
            RawRecord::Object {
                step,
                wall_time,
                value,
            } => (step?, wall_time, value),
            // Original wire order: [wall_time, step, value].
            RawRecord::Triple([wall_time, step, value]) => {
                if !step.is_finite() || step.fract() != 0.0 {
                    return None;
                }
                (step as i64, Some(wall_time), Some(value))
            }
        };
        let wall_time = wall_time?;
        let value = value?;
        if step < 0 || !wall_time.is_finite() {
            return None;
        }
        Some(ScalarSample::new(step as u64, wall_time, value))
    }
}

/// Parse a fetched JSON body into samples.
///
/// Records missing step/value, with a negative step, or with a non-finite
/// wall time are dropped silently (with a log line); only an unparseable
/// body is an error.
pub fn parse_samples(body: &str) -> Result<Vec<ScalarSample>, FetchError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = records.len();
    let samples: Vec<ScalarSample> = records
        .into_iter()
        .filter_map(|v| serde_json::from_value::<RawRecord>(v).ok())
        .filter_map(RawRecord::into_sample)
        .collect();
    if samples.len() < total {
        log::debug!(
            "dropped {} malformed of {} fetched records",
            total - samples.len(),
            total
        );
    }
    Ok(samples)
}
