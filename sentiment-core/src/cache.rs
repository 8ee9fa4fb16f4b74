//! # Result Cache
//!
//! Bounded LRU cache of finished analyses keyed by content fingerprint,
//! plus per-fingerprint in-flight tracking so concurrent identical requests
//! do not multiply the work: the first caller for a fingerprint becomes the
//! leader and computes; later callers park on a condvar and receive the
//! leader's `Arc`'d result.
//!
//! Errors are never cached. If the leader fails, waiters are woken and the
//! next one retries the computation itself, so duplicate work stays bounded
//! by the number of failures rather than the number of callers.
//!
//! No lock is held while a computation (which may include network calls)
//! runs; the two mutexes only guard map operations.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use lru::LruCache;
use tracing::debug;

use crate::error::AnalysisError;
use crate::pipeline::AnalysisResult;

enum SlotState {
    Pending,
    Done(Arc<AnalysisResult>),
    Failed,
}

struct InflightSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

enum Role {
    Leader(Arc<InflightSlot>),
    Waiter(Arc<InflightSlot>),
}

/// Bounded, concurrency-safe cache of analysis results.
pub struct ResultCache {
    entries: Mutex<LruCache<String, Arc<AnalysisResult>>>,
    inflight: Mutex<HashMap<String, Arc<InflightSlot>>>,
}

impl ResultCache {
    /// Creates a cache holding at most `capacity` results; capacity 0 is
    /// rounded up to 1 so the LRU stays well-formed.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached result for `fingerprint`, or computes it via
    /// `compute`, deduplicating concurrent identical requests.
    pub fn get_or_compute<F>(
        &self,
        fingerprint: &str,
        compute: F,
    ) -> Result<Arc<AnalysisResult>, AnalysisError>
    where
        F: FnOnce() -> Result<AnalysisResult, AnalysisError>,
    {
        let mut compute = Some(compute);
        loop {
            if let Some(hit) = lock_ignore_poison(&self.entries).get(fingerprint).cloned() {
                debug!(fingerprint, "cache hit");
                return Ok(hit);
            }

            let role = {
                let mut inflight = lock_ignore_poison(&self.inflight);
                match inflight.get(fingerprint) {
                    Some(slot) => Role::Waiter(Arc::clone(slot)),
                    None => {
                        let slot = Arc::new(InflightSlot {
                            state: Mutex::new(SlotState::Pending),
                            ready: Condvar::new(),
                        });
                        inflight.insert(fingerprint.to_string(), Arc::clone(&slot));
                        Role::Leader(slot)
                    }
                }
            };

            match role {
                Role::Leader(slot) => {
                    let f = compute.take().ok_or_else(|| {
                        AnalysisError::Internal("cache leader selected twice".into())
                    })?;
                    let outcome = f();

                    // Publish to the LRU before deregistering the slot, so a
                    // caller arriving in between still finds the result.
                    return match outcome {
                        Ok(result) => {
                            let shared = Arc::new(result);
                            lock_ignore_poison(&self.entries)
                                .put(fingerprint.to_string(), Arc::clone(&shared));
                            *lock_ignore_poison(&slot.state) = SlotState::Done(Arc::clone(&shared));
                            slot.ready.notify_all();
                            lock_ignore_poison(&self.inflight).remove(fingerprint);
                            Ok(shared)
                        }
                        Err(err) => {
                            // Deregister first so woken waiters start a fresh
                            // computation instead of re-joining this slot.
                            lock_ignore_poison(&self.inflight).remove(fingerprint);
                            *lock_ignore_poison(&slot.state) = SlotState::Failed;
                            slot.ready.notify_all();
                            Err(err)
                        }
                    };
                }
                Role::Waiter(slot) => {
                    let mut state = lock_ignore_poison(&slot.state);
                    while matches!(*state, SlotState::Pending) {
                        state = match slot.ready.wait(state) {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                    }
                    match &*state {
                        SlotState::Done(result) => return Ok(Arc::clone(result)),
                        // Leader failed: retry from the top. This caller may
                        // become the new leader and run compute itself.
                        SlotState::Failed => continue,
                        SlotState::Pending => unreachable!("wait loop exits only on Done/Failed"),
                    }
                }
            }
        }
    }

    /// Number of cached results (diagnostics only).
    pub fn len(&self) -> usize {
        lock_ignore_poison(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A poisoned mutex here only means another thread panicked mid-update of a
/// map; the maps themselves stay structurally valid, so we keep serving.
fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dummy_result(score: f64) -> AnalysisResult {
        use crate::aggregate::SentimentLabel;
        use crate::pipeline::LanguageInfo;
        AnalysisResult {
            overall_score: score,
            label: SentimentLabel::Neutral,
            positive_ratio: 0.0,
            negative_ratio: 0.0,
            neutral_ratio: 0.0,
            sentence_count: 0,
            sentence_scores: vec![],
            language: LanguageInfo {
                original: "en".into(),
                was_translated: false,
                fallback: false,
            },
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = ResultCache::new(8);
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_compute("fp1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(dummy_result(0.5))
            })
            .unwrap();
        let second = cache
            .get_or_compute("fp1", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(dummy_result(0.9))
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = ResultCache::new(8);

        let err = cache.get_or_compute("fp1", || {
            Err(AnalysisError::Extraction("empty page".into()))
        });
        assert!(err.is_err());
        assert!(cache.is_empty());

        // A later identical request recomputes and may succeed
        let ok = cache.get_or_compute("fp1", || Ok(dummy_result(0.1)));
        assert!(ok.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache = ResultCache::new(2);
        cache.get_or_compute("a", || Ok(dummy_result(0.1))).unwrap();
        cache.get_or_compute("b", || Ok(dummy_result(0.2))).unwrap();
        cache.get_or_compute("c", || Ok(dummy_result(0.3))).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_identical_requests_compute_once() {
        use std::sync::Barrier;

        let cache = Arc::new(ResultCache::new(8));
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_compute("same", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            // Give other threads a chance to pile up as waiters
                            std::thread::sleep(std::time::Duration::from_millis(30));
                            Ok(dummy_result(0.42))
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // All callers observe the identical shared result
        for result in &results {
            assert!(Arc::ptr_eq(result, &results[0]));
        }
        // The work happened a small bounded number of times (ideally once;
        // a thread that raced past the cache check before the leader
        // registered can add at most a handful more)
        assert!(calls.load(Ordering::SeqCst) <= 2);
    }
}
