mod dashmap_ttl_cache;
mod reqwest_transport;

pub use dashmap_ttl_cache::{DashMapTtlCache, DEFAULT_CACHE_TTL};
pub use reqwest_transport::{ReqwestTransport, API_VERSION, DEFAULT_BASE_URL};
