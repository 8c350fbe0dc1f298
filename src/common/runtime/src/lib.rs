//! Worker pool and async runtime utilities for Quilt.
//!
//! The execution kernel owns exactly one pool built here; everything else in
//! the workspace is synchronous.

use std::future::Future;

use common_error::{ensure, QuiltError, QuiltResult};
use tokio::runtime::{Builder, Runtime};

/// Build a fixed-size, named worker pool.
///
/// The pool is a multi-thread Tokio runtime whose worker count never changes
/// after construction. Dropping the returned runtime releases the threads.
pub fn worker_pool(threads: usize) -> QuiltResult<Runtime> {
    ensure!(threads > 0, ConfigError: "worker pool size must be at least 1");
    Builder::new_multi_thread()
        .worker_threads(threads)
        .thread_name("quilt-executor")
        .enable_time()
        .build()
        .map_err(|e| QuiltError::InternalError(format!("Failed to create worker pool: {e}")))
}

/// Number of worker threads to use when the configuration leaves it unset.
pub fn default_pool_size() -> usize {
    std::thread::available_parallelism().map_or(1, usize::from)
}

/// Block on a future using a throwaway single-use runtime.
///
/// Intended for synchronous callers outside any runtime; do not call from
/// within an async context.
pub fn block_on<F: Future>(future: F) -> QuiltResult<F::Output> {
    let runtime = Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| QuiltError::InternalError(format!("Failed to create runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_pool_rejects_zero() {
        assert!(worker_pool(0).is_err());
    }

    #[test]
    fn test_worker_pool_runs_tasks() {
        let pool = worker_pool(2).unwrap();
        let handle = pool.spawn(async { 21 * 2 });
        assert_eq!(pool.block_on(handle).unwrap(), 42);
    }

    #[test]
    fn test_default_pool_size_nonzero() {
        assert!(default_pool_size() >= 1);
    }

    #[test]
    fn test_block_on() {
        let value = block_on(async { "done" }).unwrap();
        assert_eq!(value, "done");
    }
}
