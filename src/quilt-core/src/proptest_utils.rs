//! Property-based testing utilities for quilt-core.
//!
//! This module provides proptest strategies for core types to enable
//! property-based testing of the name and value model.
