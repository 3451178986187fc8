//! Transport Port
//!
//! Defines how a single API call reaches the AMap web service.

use crate::domain::entities::QueryParams;
use crate::domain::error::AmapError;
use async_trait::async_trait;
use bytes::Bytes;

/// Performs one GET against an API endpoint.
///
/// Implementations append the API key, enforce their own deadlines and must
/// only return `Ok` for bodies the API itself reported as successful (HTTP 200
/// with `status == "1"`), since the executor caches whatever comes back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `endpoint` (e.g. `geocode/geo`) with the given query.
    async fn get(&self, endpoint: &str, query: &QueryParams) -> Result<Bytes, AmapError>;
}
