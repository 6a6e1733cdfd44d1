//! Incremental state cache
//!
//! Makes a single local file look durable across executions of the same
//! logical task by shadowing it in a keyed blob store.
//!
//! # Overview
//!
//! The state module provides:
//! - `IncrementalStateCache` - restore-before / persist-after bracketing of
//!   one task execution
//! - The fixed namespace and filename the cache is stored under

mod cache;

pub use cache::{IncrementalStateCache, STATE_DB_FILENAME, STATE_NAMESPACE};

#[cfg(test)]
mod cache_tests;
