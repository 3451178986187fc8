mod amap_client;
mod cached_executor;

pub use amap_client::{AmapClient, GEOCODE_ENDPOINT, IP_ENDPOINT, REGEO_ENDPOINT};
pub use cached_executor::CachedExecutor;
