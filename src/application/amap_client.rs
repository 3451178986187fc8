//! AMap Client - geocoding, reverse geocoding and IP location
//!
//! The entry point callers use. Each operation builds its query, runs it
//! through the cache-aside executor and decodes the body into typed
//! responses.

use crate::adapters::outbound::{DashMapTtlCache, ReqwestTransport};
use crate::application::CachedExecutor;
use crate::config::ClientConfig;
use crate::domain::entities::{
    GeocodeRequest, GeocodeResponse, IpRequest, IpResponse, QueryParams, RegeoRequest,
    RegeoResponse,
};
use crate::domain::error::AmapError;
use crate::domain::ports::{Cache, Transport};
use crate::domain::value_objects::ApiStatus;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Forward geocoding endpoint, also its cache namespace.
pub const GEOCODE_ENDPOINT: &str = "geocode/geo";
/// Reverse geocoding endpoint, also its cache namespace.
pub const REGEO_ENDPOINT: &str = "geocode/regeo";
/// IP location endpoint, also its cache namespace.
pub const IP_ENDPOINT: &str = "ip";

/// Responses carrying the shared status envelope.
trait ApiResponse {
    fn api_status(&self) -> &ApiStatus;
}

impl ApiResponse for GeocodeResponse {
    fn api_status(&self) -> &ApiStatus {
        &self.status
    }
}

impl ApiResponse for RegeoResponse {
    fn api_status(&self) -> &ApiStatus {
        &self.status
    }
}

impl ApiResponse for IpResponse {
    fn api_status(&self) -> &ApiStatus {
        &self.status
    }
}

/// Client for the AMap web service.
///
/// Cheap to share behind an `Arc`; the transport and cache are both shared
/// handles. The cache is optional and only changes how often the network is
/// hit, never what a call returns.
pub struct AmapClient {
    transport: Arc<dyn Transport>,
    executor: CachedExecutor,
}

impl AmapClient {
    /// Create an uncached client over HTTPS.
    pub fn new(config: &ClientConfig) -> Result<Self, AmapError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::from_transport(Arc::new(transport)))
    }

    /// Create a client caching responses in memory for `ttl`.
    pub fn with_ttl_cache(config: &ClientConfig, ttl: Duration) -> Result<Self, AmapError> {
        let cache = Arc::new(DashMapTtlCache::new(ttl));
        Ok(Self::new(config)?.with_cache(cache))
    }

    /// Create an uncached client over an arbitrary transport.
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            executor: CachedExecutor::uncached(),
        }
    }

    /// Replace the transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Cache responses in `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.executor = CachedExecutor::new(Some(cache));
        self
    }

    /// Stop caching responses.
    pub fn without_cache(mut self) -> Self {
        self.executor = CachedExecutor::uncached();
        self
    }

    pub fn is_cached(&self) -> bool {
        self.executor.is_cached()
    }

    /// Convert a structured address into coordinates.
    ///
    /// See: https://lbs.amap.com/api/webservice/guide/api/georegeo
    pub async fn geocode(&self, req: &GeocodeRequest) -> Result<GeocodeResponse, AmapError> {
        self.call(GEOCODE_ENDPOINT, req, req.to_query()).await
    }

    /// Convert coordinates into an address.
    pub async fn regeo(&self, req: &RegeoRequest) -> Result<RegeoResponse, AmapError> {
        self.call(REGEO_ENDPOINT, req, req.to_query()).await
    }

    /// Locate an IPv4 address at city level. Foreign addresses are not supported
    /// upstream and come back with empty fields.
    pub async fn ip(&self, req: &IpRequest) -> Result<IpResponse, AmapError> {
        self.call(IP_ENDPOINT, req, req.to_query()).await
    }

    /// Locate the public IP this client calls from.
    pub async fn current_ip(&self) -> Result<IpResponse, AmapError> {
        self.ip(&IpRequest::default()).await
    }

    async fn call<P, R>(&self, endpoint: &str, key_params: &P, query: QueryParams) -> Result<R, AmapError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + ApiResponse,
    {
        let body = self
            .executor
            .execute(endpoint, key_params, || self.transport.get(endpoint, &query))
            .await?;

        let resp: R = serde_json::from_slice(&body).map_err(AmapError::Decode)?;
        if let Some(err) = resp.api_status().to_error() {
            return Err(err);
        }

        Ok(resp)
    }
}
