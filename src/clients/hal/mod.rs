//! HAL client for HATEOAS REST APIs.
//!
//! This module provides the [`HalClient`] type, which turns typed requests
//! into HTTP calls and HAL responses into typed resources, and the
//! [`ResourceCache`] seam used to serve repeated GETs.

/// Emits a stage event at `info` in verbose mode, `debug` otherwise.
macro_rules! stage {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

mod cache;
mod client;
mod executor;

pub use cache::{CacheKey, InMemoryCache, NoopCache, ResourceCache};
pub use client::HalClient;
pub use executor::HttpExecutor;
