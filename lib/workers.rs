//! Bounded pool of worker threads for filling output buffers.
//!
//! A gate application computes each output entry as a pure function of the
//! (read-only) input state, so the output can be split into contiguous,
//! disjoint ranges and handed to separate workers with no locking. The values
//! produced don't depend on how the output was split.

use std::sync::Arc;
use num_complex::Complex64 as C64;
use rayon::{ prelude::*, ThreadPool, ThreadPoolBuilder };
use tracing::trace;
use crate::error::ConfigError;

/// A fixed number of worker threads.
///
/// Cloning is cheap and shares the same threads.
#[derive(Clone, Debug)]
pub struct Workers {
    count: usize,
    pool: Arc<ThreadPool>,
}

impl Workers {
    /// Start `count` workers.
    ///
    /// Fails if `count` is zero or the threads can't be started.
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        if count == 0 { return Err(ConfigError::MaxConcurrencyNotPositive); }
        let pool
            = ThreadPoolBuilder::new()
            .num_threads(count)
            .thread_name(|k| format!("qsim-worker-{}", k))
            .build()?;
        Ok(Self { count, pool: Arc::new(pool) })
    }

    /// Return the number of workers.
    pub fn count(&self) -> usize { self.count }

    /// Produce `len` values by evaluating `value(k)` for each index `k`.
    ///
    /// The index space is cut into at most `self.count()` contiguous ranges,
    /// each filled by one worker.
    pub fn collect<F>(&self, len: usize, value: F) -> Vec<C64>
    where F: Fn(usize) -> C64 + Sync
    {
        let mut out: Vec<C64> = vec![C64::from(0.0); len];
        if len == 0 { return out; }
        let chunk = len.div_ceil(self.count);
        trace!(len, chunk, workers = self.count, "partitioning output");
        self.pool.install(|| {
            out.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(k, range)| {
                    let offs = k * chunk;
                    range.iter_mut()
                        .enumerate()
                        .for_each(|(j, z)| { *z = value(offs + j); });
                });
        });
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_workers_is_an_error() {
        assert!(matches!(
            Workers::new(0),
            Err(ConfigError::MaxConcurrencyNotPositive)
        ));
    }

    #[test]
    fn collect_fills_every_index() {
        for count in [1, 2, 3, 8] {
            let workers = Workers::new(count).unwrap();
            assert_eq!(workers.count(), count);
            let out = workers.collect(13, |k| C64::new(k as f64, -(k as f64)));
            assert_eq!(out.len(), 13);
            out.iter().enumerate()
                .for_each(|(k, z)| { assert_eq!(*z, C64::new(k as f64, -(k as f64))); });
        }
    }

    #[test]
    fn collect_more_workers_than_entries() {
        let workers = Workers::new(8).unwrap();
        let out = workers.collect(2, |k| C64::from(k as f64 + 1.0));
        assert_eq!(out, vec![C64::from(1.0), C64::from(2.0)]);
        assert!(workers.collect(0, |_| C64::from(1.0)).is_empty());
    }
}
