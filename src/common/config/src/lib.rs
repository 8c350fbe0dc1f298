//! Configuration management for Quilt.
//!
//! Provides runtime configuration for the routing resolver and the parallel
//! execution kernel. Loading these structs from files or the environment is
//! the surrounding system's concern.

use serde::{Deserialize, Serialize};

/// Global Quilt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
pub struct QuiltConfig {
    /// Execution kernel configuration.
    pub execution: ExecutionConfig,
}

/// Execution kernel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Default execution mode for statement groups.
    #[serde(default)]
    pub default_mode: ExecutionMode,
    /// Number of worker threads in the kernel's pool.
    /// `None` uses the host's available parallelism.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_mode: ExecutionMode::Parallel,
            worker_threads: None,
        }
    }
}

impl ExecutionConfig {
    /// Set the default execution mode.
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Set the worker pool size.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }
}

/// Execution mode for statement groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExecutionMode {
    /// Fan groups out across the worker pool.
    #[default]
    Parallel,
    /// Run groups one after another on the calling thread, preserving
    /// generated-key and shared-state ordering.
    Serial,
}

impl ExecutionMode {
    /// Whether this mode runs groups serially.
    pub const fn is_serial(self) -> bool {
        matches!(self, Self::Serial)
    }
}
