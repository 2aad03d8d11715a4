//! Admission-controlled executor
//!
//! Runs at most `max_concurrent` operations at once, queues the overflow in
//! arrival order, and short-circuits keyed submissions whose result is still
//! fresh in the result cache.
//!
//! # Admission
//! ```text
//! submit(op, key)
//!   ├─ key cached and fresh ─────────────► resolved, no slot used
//!   ├─ in_flight < max_concurrent ───────► in_flight += 1, spawn
//!   └─ otherwise ────────────────────────► pending.push_back
//!
//! operation finishes (Ok, Err or panic)
//!   ├─ Ok with key ──► cache[key] = value
//!   ├─ in_flight -= 1
//!   └─ pending non-empty ──► pop_front, in_flight += 1, spawn   (one per completion)
//! ```
//!
//! All bookkeeping happens under a single lock; operations themselves run
//! outside it, as independent tokio tasks.

use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ExecutorConfig;
use crate::error::{CacheError, ConfigError};
use crate::queue::submission::Settled;
use crate::queue::{CacheStats, ResultCache, Submission};

type Job = BoxFuture<'static, ()>;

// == Status ==
/// Point-in-time view of the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutorStatus {
    /// Operations currently running
    pub in_flight: usize,
    /// Operations waiting for a free slot
    pub pending_count: usize,
    /// Entries held in the result cache (stale ones included until looked up)
    pub cache_size: usize,
}

struct State<T> {
    in_flight: usize,
    pending: VecDeque<Job>,
    cache: ResultCache<T>,
}

impl<T> State<T> {
    /// Pops the next pending job if a slot is free, claiming the slot.
    fn admit_next(&mut self, max_concurrent: usize) -> Option<Job> {
        if self.in_flight >= max_concurrent {
            return None;
        }
        let job = self.pending.pop_front()?;
        self.in_flight += 1;
        Some(job)
    }
}

struct Inner<T> {
    config: ExecutorConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<State<T>>,
}

impl<T: Clone + Send + 'static> Inner<T> {
    /// Releases a slot, optionally caching a fresh result, then drains one
    /// pending job into the freed slot.
    fn finish(&self, fresh: Option<(String, T)>) {
        let next = {
            let mut state = self.state.lock();
            if let Some((key, value)) = fresh {
                state.cache.insert(key, value, self.clock.now_ms());
            }
            state.in_flight = state.in_flight.saturating_sub(1);
            let next = state.admit_next(self.config.max_concurrent);
            debug!(
                in_flight = state.in_flight,
                pending = state.pending.len(),
                "operation completed"
            );
            next
        };

        if let Some(job) = next {
            // May run from a drop during runtime shutdown, where there is
            // nothing left to spawn on.
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(job);
                }
                Err(_) => warn!("no runtime available, dropping queued operation"),
            }
        }
    }
}

/// Holds one concurrency slot for the lifetime of a running operation.
///
/// Released explicitly through [`Slot::complete`]; if the running task is
/// dropped instead (runtime shutdown), `Drop` releases it so the count never
/// leaks.
struct Slot<T: Clone + Send + 'static> {
    inner: Option<Arc<Inner<T>>>,
}

impl<T: Clone + Send + 'static> Slot<T> {
    fn complete(mut self, fresh: Option<(String, T)>) {
        if let Some(inner) = self.inner.take() {
            inner.finish(fresh);
        }
    }
}

impl<T: Clone + Send + 'static> Drop for Slot<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.finish(None);
        }
    }
}

// == Executor ==
/// Bounded-concurrency executor with a time-bounded result cache.
///
/// Cloning is cheap and every clone drives the same slots, queue and cache,
/// so one instance can be constructed at startup and handed to whoever needs
/// it.
///
/// The executor is generic over the value type `T` it caches; the error type
/// is chosen per submission and always reaches the caller untouched.
pub struct Executor<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Executor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Executor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> Executor<T> {
    /// Creates an executor reading the system clock.
    pub fn new(config: ExecutorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }

    /// Creates an executor timestamping cache entries with `clock`.
    pub fn with_clock(config: ExecutorConfig, clock: impl Clock) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                clock: Arc::new(clock),
                state: Mutex::new(State {
                    in_flight: 0,
                    pending: VecDeque::new(),
                    cache: ResultCache::new(config.cache_expiry.as_millis() as u64),
                }),
            }),
        })
    }

    pub fn config(&self) -> ExecutorConfig {
        self.inner.config
    }

    // == Submit ==
    /// Submits `operation`, returning a handle that settles with its outcome.
    ///
    /// With a `cache_key`, a result stored for that key less than
    /// `cache_expiry` ago is returned without invoking `operation`, and a
    /// successful run stores its result under the key. `None` disables
    /// caching; `Some("")` is an ordinary key.
    ///
    /// Submissions sharing a key that is not yet cached are not merged: each
    /// one runs.
    ///
    /// Never blocks. Must be called from within a tokio runtime.
    pub fn submit<F, Fut, E>(&self, operation: F, cache_key: Option<&str>) -> Submission<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Send + 'static,
    {
        let mut state = self.inner.state.lock();

        if let Some(key) = cache_key {
            match state.cache.get(key, self.inner.clock.now_ms()) {
                Ok(value) => {
                    debug!(cache_key = key, "returning cached result");
                    return Submission::ready(Ok(value));
                }
                Err(CacheError::Expired(_)) => {
                    debug!(cache_key = key, "discarded expired cache entry");
                }
                Err(CacheError::NotFound(_)) => {}
            }
        }

        let (tx, submission) = Submission::channel();
        let job = run(
            Arc::clone(&self.inner),
            operation,
            cache_key.map(str::to_owned),
            tx,
        )
        .boxed();

        if state.in_flight < self.inner.config.max_concurrent {
            state.in_flight += 1;
            debug!(in_flight = state.in_flight, "executing operation");
            drop(state);
            tokio::spawn(job);
        } else {
            state.pending.push_back(job);
            debug!(pending = state.pending.len(), "operation queued");
        }

        submission
    }

    // == Clear Cache ==
    /// Drops every cached result. Running and queued operations are unaffected.
    pub fn clear_cache(&self) -> usize {
        let removed = self.inner.state.lock().cache.clear();
        info!(removed, "result cache cleared");
        removed
    }

    // == Status ==
    pub fn status(&self) -> ExecutorStatus {
        let state = self.inner.state.lock();
        ExecutorStatus {
            in_flight: state.in_flight,
            pending_count: state.pending.len(),
            cache_size: state.cache.len(),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.state.lock().cache.stats()
    }
}

/// Body of an admitted job. The slot was claimed by whoever spawned it.
async fn run<T, E, F, Fut>(
    inner: Arc<Inner<T>>,
    operation: F,
    cache_key: Option<String>,
    tx: oneshot::Sender<Settled<T, E>>,
) where
    T: Clone + Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let slot = Slot { inner: Some(inner) };

    let outcome = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;

    let settled = match outcome {
        Ok(result) => {
            let fresh = match (&result, cache_key) {
                (Ok(value), Some(key)) => Some((key, value.clone())),
                _ => None,
            };
            slot.complete(fresh);
            Settled::Finished(result)
        }
        Err(payload) => {
            warn!("operation panicked");
            slot.complete(None);
            Settled::Panicked(payload)
        }
    };

    // The caller may have dropped its Submission; the outcome is discarded.
    let _ = tx.send(settled);
}
