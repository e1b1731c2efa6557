//! Core sample and series types shared by the processing pipeline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One logged scalar observation for a (run, tag) pair.
///
/// Samples are immutable once ingested. Within a well-formed series `step`
/// values are unique and strictly increasing; the store re-establishes this
/// on every append rather than trusting the producer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarSample {
    /// Training step the value was logged at.
    pub step: u64,
    /// Wall-clock time of the observation, in seconds since the UNIX epoch.
    pub wall_time: f64,
    /// The logged scalar value (loss, accuracy, ...).
    pub value: f64,
}

impl ScalarSample {
    pub fn new(step: u64, wall_time: f64, value: f64) -> Self {
        Self {
            step,
            wall_time,
            value,
        }
    }
}

/// Identifies one series: the samples of a single tag within a single run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub run: String,
    pub tag: String,
}

impl SeriesKey {
    pub fn new<R: Into<String>, T: Into<String>>(run: R, tag: T) -> Self {
        Self {
            run: run.into(),
            tag: tag.into(),
        }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.run, self.tag)
    }
}

/// Cheap immutable view of one series.
///
/// Cloning a snapshot clones an `Arc`, never the sample data, so downstream
/// pipeline stages can hold on to the exact population they derived from
/// while the store keeps appending.
#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    points: Arc<Vec<ScalarSample>>,
    version: u64,
}

impl SeriesSnapshot {
    pub(crate) fn new(points: Arc<Vec<ScalarSample>>, version: u64) -> Self {
        Self { points, version }
    }

    /// The samples, sorted by step with unique steps.
    pub fn samples(&self) -> &[ScalarSample] {
        &self.points
    }

    /// Store version this snapshot was taken at. Increases on every append
    /// that changed the series; derived caches compare against it.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
