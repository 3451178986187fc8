//! AMap Client Library
//!
//! Typed access to the AMap geocoding, reverse geocoding and IP location
//! web services, with an optional cache-aside layer in front of the network.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{DashMapTtlCache, ReqwestTransport, DEFAULT_CACHE_TTL};
pub use application::{AmapClient, CachedExecutor};
pub use config::{load_config, ClientConfig, ConfigError};
pub use domain::entities::{
    AddressComponent, Geocode, GeocodeRequest, GeocodeResponse, IpRequest, IpResponse, Poi,
    RegeoRequest, RegeoResponse, Regeocode,
};
pub use domain::error::AmapError;
pub use domain::ports::{Cache, Transport};
pub use domain::services::fingerprint;
pub use domain::value_objects::{ApiStatus, Extensions, LngLat};
