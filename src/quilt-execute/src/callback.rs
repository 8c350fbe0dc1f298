//! Per-group execution callbacks.

use common_error::QuiltResult;

use crate::context::ExecutorDataMap;

/// The pluggable unit of work the kernel runs against each execution group.
///
/// The rewrite/preparation layer supplies one implementation per statement
/// kind (query vs. update). `is_trunk` distinguishes the calling thread's
/// synchronous share of a parallel run from pooled worker invocations;
/// `data_map` is the calling thread's context, handed off explicitly.
pub trait GroupExecuteCallback<I, O>: Send + Sync {
    /// Run one group's inputs, returning one output per input in order.
    fn on_group(
        &self,
        inputs: Vec<I>,
        is_trunk: bool,
        data_map: &ExecutorDataMap,
    ) -> QuiltResult<Vec<O>>;
}

impl<I, O, F> GroupExecuteCallback<I, O> for F
where
    F: Fn(Vec<I>, bool, &ExecutorDataMap) -> QuiltResult<Vec<O>> + Send + Sync,
{
    fn on_group(
        &self,
        inputs: Vec<I>,
        is_trunk: bool,
        data_map: &ExecutorDataMap,
    ) -> QuiltResult<Vec<O>> {
        self(inputs, is_trunk, data_map)
    }
}
