//! Live update control: polls still-running runs and feeds the store.
//!
//! One watcher per (run, tag). A watcher in `Polling` owns a worker thread
//! that periodically calls the [`SampleFetcher`] and sends the result into
//! a shared mpsc channel; the UI thread drains that channel once per frame
//! and applies batches to the [`SampleStore`]. All cross-thread traffic
//! goes through the channel, so pipeline state is only ever touched from
//! the UI thread.
//!
//! Cancellation is an atomic stop flag plus a generation counter: stopping
//! a watcher bumps its generation, and any in-flight result tagged with the
//! old generation is discarded on drain. Deselecting a run or toggling it
//! off therefore never lets a stale response mutate the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::data::sample::SeriesKey;
use crate::data::store::SampleStore;
use crate::fetch::{FetchBatch, FetchError, SampleFetcher};

/// Poll state of one watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
}

/// Message sent by a poll worker for one fetch attempt.
pub struct PollMessage {
    pub key: SeriesKey,
    /// Watcher generation the fetch was issued under.
    pub generation: u64,
    pub result: Result<FetchBatch, FetchError>,
}

/// Cloneable sender half used by poll workers (and by tests to inject
/// batches without threads).
#[derive(Clone)]
pub struct PollSink {
    tx: Sender<PollMessage>,
}

impl PollSink {
    pub fn send(&self, msg: PollMessage) {
        // Receiver dropped means the dashboard is gone; nothing to do.
        let _ = self.tx.send(msg);
    }
}

struct Watcher {
    state: PollState,
    generation: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    /// Consecutive failed polls since the last success.
    failures: u32,
}

impl Watcher {
    fn new() -> Self {
        Self {
            state: PollState::Idle,
            generation: Arc::new(AtomicU64::new(0)),
            stop: Arc::new(AtomicBool::new(false)),
            failures: 0,
        }
    }

    fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::Relaxed);
        self.state = PollState::Idle;
    }
}

/// Result of draining the poll channel for one frame.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Series that received at least one new sample; each triggers one
    /// pipeline recomputation (at most one per drain).
    pub updated: Vec<SeriesKey>,
    /// Watchers that transitioned to Idle because the server reported the
    /// run finished.
    pub finished: Vec<SeriesKey>,
    /// Failed polls seen this drain (already counted per watcher).
    pub errors: Vec<(SeriesKey, FetchError)>,
}

impl DrainReport {
    pub fn has_new_data(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Governs polling for all watched series.
pub struct LiveUpdateController {
    sink: PollSink,
    rx: Receiver<PollMessage>,
    watchers: HashMap<SeriesKey, Watcher>,
    poll_interval: Duration,
    /// Consecutive failures after which [`Self::has_persistent_failures`]
    /// reports true so the UI can show an error banner.
    failure_threshold: u32,
}

impl LiveUpdateController {
    pub fn new(poll_interval: Duration, failure_threshold: u32) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            sink: PollSink { tx },
            rx,
            watchers: HashMap::new(),
            poll_interval,
            failure_threshold,
        }
    }

    /// Sender half of the poll channel.
    pub fn sink(&self) -> PollSink {
        self.sink.clone()
    }

    pub fn state(&self, key: &SeriesKey) -> PollState {
        self.watchers
            .get(key)
            .map(|w| w.state)
            .unwrap_or(PollState::Idle)
    }

    pub fn is_polling(&self, key: &SeriesKey) -> bool {
        self.state(key) == PollState::Polling
    }

    /// Whether the watcher has failed at least `failure_threshold` polls in
    /// a row since its last success.
    pub fn has_persistent_failures(&self, key: &SeriesKey) -> bool {
        self.watchers
            .get(key)
            .map(|w| w.failures >= self.failure_threshold)
            .unwrap_or(false)
    }

    /// Ensure a watcher exists for `key` and start polling if `running`.
    ///
    /// Enters `Polling` only from `Idle`; a watcher that is already polling
    /// is left alone. With `running == false` this is equivalent to
    /// [`Self::stop`].
    pub fn watch(
        &mut self,
        fetcher: Arc<dyn SampleFetcher>,
        key: SeriesKey,
        running: bool,
        start_step: Option<u64>,
    ) {
        if !running {
            self.stop(&key);
            return;
        }
        let watcher = self.watchers.entry(key.clone()).or_insert_with(Watcher::new);
        if watcher.state == PollState::Polling {
            return;
        }
        watcher.state = PollState::Polling;
        watcher.stop = Arc::new(AtomicBool::new(false));
        // Capture the generation here, not in the worker: a stop() racing
        // the thread start must leave the worker on the pre-cancel
        // generation so its results are discarded.
        let generation = watcher.generation.load(Ordering::Relaxed);
        let stop = Arc::clone(&watcher.stop);
        let sink = self.sink.clone();
        let interval = self.poll_interval;
        std::thread::spawn(move || {
            run_poll_worker(fetcher, key, generation, stop, sink, interval, start_step)
        });
    }

    /// Stop polling `key` and invalidate any in-flight fetch result for it.
    pub fn stop(&mut self, key: &SeriesKey) {
        if let Some(w) = self.watchers.get_mut(key) {
            if w.state == PollState::Polling {
                w.cancel();
            }
        }
    }

    /// Stop every watcher belonging to `run` (run deselected or removed).
    pub fn stop_run(&mut self, run: &str) {
        let keys: Vec<SeriesKey> = self
            .watchers
            .keys()
            .filter(|k| k.run == run)
            .cloned()
            .collect();
        for key in keys {
            self.stop(&key);
        }
    }

    pub fn stop_all(&mut self) {
        let keys: Vec<SeriesKey> = self.watchers.keys().cloned().collect();
        for key in keys {
            self.stop(&key);
        }
    }

    /// Drain pending poll results into the store. Called once per UI frame.
    ///
    /// Stale messages (generation mismatch after a cancel) are discarded.
    /// Successful batches reset the failure counter and append samples;
    /// failures only bump the counter, the worker retries on its next
    /// interval.
    pub fn drain(&mut self, store: &mut SampleStore) -> DrainReport {
        let mut report = DrainReport::default();
        while let Ok(msg) = self.rx.try_recv() {
            let Some(watcher) = self.watchers.get_mut(&msg.key) else {
                continue;
            };
            if msg.generation != watcher.generation.load(Ordering::Relaxed) {
                log::debug!("discarding stale poll result for {}", msg.key);
                continue;
            }
            match msg.result {
                Ok(batch) => {
                    watcher.failures = 0;
                    if !batch.samples.is_empty()
                        && store.append(&msg.key.run, &msg.key.tag, &batch.samples)
                        && !report.updated.contains(&msg.key)
                    {
                        report.updated.push(msg.key.clone());
                    }
                    if batch.finished && watcher.state == PollState::Polling {
                        watcher.cancel();
                        report.finished.push(msg.key.clone());
                    }
                }
                Err(err) => {
                    watcher.failures = watcher.failures.saturating_add(1);
                    log::warn!(
                        "poll for {} failed ({} in a row): {}",
                        msg.key,
                        watcher.failures,
                        err
                    );
                    report.errors.push((msg.key.clone(), err));
                }
            }
        }
        report
    }
}

impl Drop for LiveUpdateController {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn run_poll_worker(
    fetcher: Arc<dyn SampleFetcher>,
    key: SeriesKey,
    generation: u64,
    stop: Arc<AtomicBool>,
    sink: PollSink,
    interval: Duration,
    mut cursor: Option<u64>,
) {
    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        let result = fetcher.fetch(&key.run, &key.tag, cursor);
        let finished = matches!(&result, Ok(b) if b.finished);
        if let Ok(batch) = &result {
            if let Some(last) = batch.samples.last() {
                cursor = Some(cursor.map_or(last.step, |c| c.max(last.step)));
            }
        }
        sink.send(PollMessage {
            key: key.clone(),
            generation,
            result,
        });
        if finished {
            break;
        }
        std::thread::sleep(interval);
    }
}
