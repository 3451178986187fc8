//! Cached Executor - cache-aside request execution
//!
//! Decides per call whether the network is needed: compute the request's
//! fingerprint, serve a cached body if there is one, otherwise perform the
//! call and remember a successful result.

use crate::domain::error::AmapError;
use crate::domain::ports::Cache;
use crate::domain::services::fingerprint;
use bytes::Bytes;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Cache-aside executor.
///
/// Per invocation it performs one cache read, at most one network call and
/// at most one cache write. Concurrent misses on the same key are not
/// coalesced: each performs its own call and the last write wins.
#[derive(Clone, Default)]
pub struct CachedExecutor {
    cache: Option<Arc<dyn Cache>>,
}

impl CachedExecutor {
    /// Create an executor backed by `cache`, or a pass-through one for `None`.
    pub fn new(cache: Option<Arc<dyn Cache>>) -> Self {
        Self { cache }
    }

    /// An executor that always performs the call.
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Return the body for `key_params` under `namespace`.
    ///
    /// # Arguments
    /// * `namespace` - Operation identifier, unique per endpoint
    /// * `key_params` - Value the cache key is derived from
    /// * `perform_call` - The network call, invoked only on a miss
    ///
    /// # Errors
    /// `Encoding` if `key_params` cannot be serialized, otherwise whatever
    /// `perform_call` fails with. Failures are never cached; cached bodies are
    /// returned without revalidation.
    pub async fn execute<P, F, Fut>(
        &self,
        namespace: &str,
        key_params: &P,
        perform_call: F,
    ) -> Result<Bytes, AmapError>
    where
        P: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, AmapError>>,
    {
        let cache = match &self.cache {
            Some(cache) => cache,
            None => return perform_call().await,
        };

        let key = fingerprint(namespace, key_params)?;

        if let Some(body) = cache.get(&key).await {
            tracing::debug!("cache hit {}", key);
            return Ok(body);
        }

        tracing::debug!("cache miss {}", key);
        let body = perform_call().await?;
        cache.set(&key, body.clone()).await;

        Ok(body)
    }
}
