//! SampleStore: append-only raw sample storage per (run, tag).
//!
//! The store owns the raw data; every downstream artifact (filtered,
//! smoothed, axis-mapped series) is derived elsewhere and never written
//! back. Appends keep each series sorted by step and deduplicate repeated
//! steps with last-write-wins semantics, so samples arriving out of network
//! order still produce a well-formed series.

use std::collections::HashMap;
use std::sync::Arc;

use crate::data::sample::{ScalarSample, SeriesKey, SeriesSnapshot};

struct SeriesData {
    points: Arc<Vec<ScalarSample>>,
    version: u64,
}

/// Raw scalar samples for all tracked (run, tag) pairs.
#[derive(Default)]
pub struct SampleStore {
    series: HashMap<SeriesKey, SeriesData>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `samples` into the series for (run, tag).
    ///
    /// The result is sorted by step; a sample whose step already exists
    /// replaces the stored one (last write wins). An empty input is a no-op.
    /// Returns `true` when the series changed, which bumps its version and
    /// thereby invalidates derived caches on their next read.
    pub fn append(&mut self, run: &str, tag: &str, samples: &[ScalarSample]) -> bool {
        if samples.is_empty() {
            return false;
        }
        let entry = self
            .series
            .entry(SeriesKey::new(run, tag))
            .or_insert_with(|| SeriesData {
                points: Arc::new(Vec::new()),
                version: 0,
            });

        let mut merged: Vec<ScalarSample> =
            Vec::with_capacity(entry.points.len() + samples.len());
        merged.extend_from_slice(&entry.points);
        merged.extend_from_slice(samples);
        // Stable sort keeps incoming samples after stored ones for equal
        // steps, so the overwrite below implements last-write-wins.
        merged.sort_by_key(|s| s.step);

        let mut deduped: Vec<ScalarSample> = Vec::with_capacity(merged.len());
        for s in merged {
            match deduped.last_mut() {
                Some(last) if last.step == s.step => *last = s,
                _ => deduped.push(s),
            }
        }

        if deduped == **entry.points {
            return false;
        }
        entry.points = Arc::new(deduped);
        entry.version = entry.version.wrapping_add(1);
        true
    }

    /// Current immutable view of the series, or `None` if nothing was ever
    /// appended for this (run, tag). O(1): clones an `Arc`, not the data.
    pub fn snapshot(&self, run: &str, tag: &str) -> Option<SeriesSnapshot> {
        self.series
            .get(&SeriesKey::new(run, tag))
            .map(|d| SeriesSnapshot::new(Arc::clone(&d.points), d.version))
    }

    /// Version counter for the series; bumps whenever an append changed it.
    pub fn version(&self, run: &str, tag: &str) -> Option<u64> {
        self.series.get(&SeriesKey::new(run, tag)).map(|d| d.version)
    }

    /// Highest step currently stored for the series. Used as the incremental
    /// fetch cursor by the live update controller.
    pub fn last_step(&self, run: &str, tag: &str) -> Option<u64> {
        self.series
            .get(&SeriesKey::new(run, tag))
            .and_then(|d| d.points.last().map(|s| s.step))
    }

    pub fn series_len(&self, run: &str, tag: &str) -> usize {
        self.series
            .get(&SeriesKey::new(run, tag))
            .map(|d| d.points.len())
            .unwrap_or(0)
    }

    /// Drop every series belonging to `run` (e.g. after the run disappears
    /// from the discovery listing).
    pub fn remove_run(&mut self, run: &str) {
        self.series.retain(|k, _| k.run != run);
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}
