//! The executor kernel: serial or parallel fan-out over a managed pool.

use std::sync::Arc;

use log::debug;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use common_config::ExecutionConfig;
use common_error::{QuiltError, QuiltResult};

use crate::callback::GroupExecuteCallback;
use crate::context::ExecutorDataMap;
use crate::group::ExecutionGroup;

/// Runs execution groups against a pluggable callback and returns their
/// outputs in group-submission order.
///
/// Owns one fixed-size worker pool for the life of the process: created at
/// system start, closed exactly once at shutdown via [`close`](Self::close).
/// In parallel mode the first group runs synchronously on the calling thread
/// (the trunk execution) while every remaining group is submitted to the
/// pool; the calling thread's [`ExecutorDataMap`] is snapshotted once and
/// handed into each submitted closure.
#[derive(Debug)]
pub struct ExecutorKernel {
    runtime: Runtime,
    pool_size: usize,
}

impl ExecutorKernel {
    /// Create a kernel with a fixed worker pool size.
    pub fn new(pool_size: usize) -> QuiltResult<Self> {
        Ok(Self {
            runtime: common_runtime::worker_pool(pool_size)?,
            pool_size,
        })
    }

    /// Create a kernel from the execution configuration.
    pub fn from_config(config: &ExecutionConfig) -> QuiltResult<Self> {
        let pool_size = config
            .worker_threads
            .unwrap_or_else(common_runtime::default_pool_size);
        Self::new(pool_size)
    }

    /// Worker pool size fixed at construction.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Run all groups in parallel with one callback for every group.
    pub fn execute<I, O>(
        &self,
        groups: Vec<ExecutionGroup<I>>,
        callback: Arc<dyn GroupExecuteCallback<I, O>>,
    ) -> QuiltResult<Vec<O>>
    where
        I: Send + 'static,
        O: Send + 'static,
    {
        self.execute_grouped(groups, None, callback, false)
    }

    /// Run all groups, with an optional distinct callback for the first
    /// group and an explicit serial/parallel choice.
    ///
    /// Outputs are concatenated in group order regardless of which shard
    /// responds first. The first failure discovered aborts the call: on the
    /// trunk path immediately, on the worker path while draining submitted
    /// tasks in submission order (later concurrent failures are masked).
    /// Database-access errors surface unwrapped; anything else is wrapped as
    /// an engine execution error. The kernel never retries.
    pub fn execute_grouped<I, O>(
        &self,
        groups: Vec<ExecutionGroup<I>>,
        first_callback: Option<Arc<dyn GroupExecuteCallback<I, O>>>,
        callback: Arc<dyn GroupExecuteCallback<I, O>>,
        serial: bool,
    ) -> QuiltResult<Vec<O>>
    where
        I: Send + 'static,
        O: Send + 'static,
    {
        // Snapshot once, before anything is submitted.
        let data_map = ExecutorDataMap::current();

        let mut groups = groups.into_iter();
        let Some(first_group) = groups.next() else {
            return Ok(Vec::new());
        };
        let trunk_callback = first_callback.unwrap_or_else(|| Arc::clone(&callback));

        if serial {
            let mut outputs = trunk_callback
                .on_group(first_group.into_inputs(), true, &data_map)
                .map_err(surface)?;
            for group in groups {
                outputs.extend(
                    callback
                        .on_group(group.into_inputs(), true, &data_map)
                        .map_err(surface)?,
                );
            }
            return Ok(outputs);
        }

        // Parallel: submit the remaining groups first, then run the trunk.
        let handles: Vec<JoinHandle<QuiltResult<Vec<O>>>> = groups
            .map(|group| {
                let callback = Arc::clone(&callback);
                let data_map = data_map.clone();
                self.runtime.spawn(async move {
                    callback.on_group(group.into_inputs(), false, &data_map)
                })
            })
            .collect();
        debug!(
            "executing statement as trunk + {} worker task(s) on pool of {}",
            handles.len(),
            self.pool_size
        );

        let mut outputs = trunk_callback
            .on_group(first_group.into_inputs(), true, &data_map)
            .map_err(surface)?;

        // Drain in submission order, never completion order.
        for handle in handles {
            match self.runtime.block_on(handle) {
                Ok(Ok(worker_outputs)) => outputs.extend(worker_outputs),
                Ok(Err(err)) => return Err(surface(err)),
                Err(join_err) => {
                    return Err(QuiltError::internal(format!(
                        "worker task aborted: {join_err}"
                    )))
                }
            }
        }
        Ok(outputs)
    }

    /// Release the worker pool. Call exactly once at system shutdown.
    ///
    /// New work is no longer accepted; tasks already running are not
    /// forcibly cancelled.
    pub fn close(self) {
        debug!("closing executor kernel (pool of {})", self.pool_size);
        drop(self.runtime);
    }
}

/// Apply the kernel's error-surfacing policy.
fn surface(err: QuiltError) -> QuiltError {
    match err {
        QuiltError::DataAccess(_) | QuiltError::ExecutionError(_) => err,
        other => QuiltError::execution(other.to_string()),
    }
}
