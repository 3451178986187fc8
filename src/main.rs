//! amap-demo - walks through every AMap client operation
//!
//! This is the composition root that wires the transport and cache into the
//! client, then runs each lookup once and a repeated lookup to show caching.

use amap_client::{
    load_config, AmapClient, DashMapTtlCache, Extensions, GeocodeRequest, IpRequest,
    RegeoRequest, ReqwestTransport,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting amap-demo base_url={} cache_enabled={}",
        cfg.base_url,
        cfg.cache_enabled
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters
    let transport = Arc::new(ReqwestTransport::new(&cfg)?);
    let mut client = AmapClient::from_transport(transport);

    if cfg.cache_enabled {
        let cache = Arc::new(DashMapTtlCache::new(cfg.cache_ttl));
        cache.start_gc(cfg.cache_gc_interval);
        tracing::info!("response cache enabled ttl={:?}", cfg.cache_ttl);
        client = client.with_cache(cache);
    }

    // 2. Run the lookups
    geocode_demo(&client).await;
    regeo_demo(&client).await;
    ip_demo(&client).await;
    cache_demo(&client).await;

    Ok(())
}

async fn geocode_demo(client: &AmapClient) {
    println!("=== Geocode ===");
    let req = GeocodeRequest::new("北京市朝阳区阜通东大街6号").city("北京");

    match client.geocode(&req).await {
        Ok(resp) => match resp.geocodes.first() {
            Some(geocode) => {
                println!("address:   {}", req.address);
                println!("location:  {}", geocode.location);
                if let Some(point) = geocode.coordinates() {
                    println!("longitude: {:.6}", point.lng);
                    println!("latitude:  {:.6}", point.lat);
                }
                println!("province:  {}", geocode.province);
                println!("city:      {}", geocode.city);
                println!("district:  {}", geocode.district);
                println!("level:     {}", geocode.level);
            }
            None => println!("no match for {}", req.address),
        },
        Err(e) => tracing::error!("geocode failed: {}", e),
    }
    println!();
}

async fn regeo_demo(client: &AmapClient) {
    println!("=== Reverse geocode ===");
    let req = RegeoRequest::new("116.310003,39.991957")
        .radius(1000)
        .extensions(Extensions::All);

    match client.regeo(&req).await {
        Ok(resp) => {
            let regeo = resp.regeocode;
            let addr = &regeo.address_component;
            println!("location:  {}", req.location);
            println!("address:   {}", regeo.formatted_address);
            println!("province:  {}", addr.province);
            println!("city:      {}", addr.city);
            println!("district:  {}", addr.district);
            println!("township:  {}", addr.township);

            if !regeo.pois.is_empty() {
                println!("nearby POIs ({}):", regeo.pois.len());
                for poi in regeo.pois.iter().take(3) {
                    println!("  - {} ({}) {}m", poi.name, poi.kind, poi.distance);
                }
            }
            if !regeo.roads.is_empty() {
                println!("nearby roads ({}):", regeo.roads.len());
                for road in regeo.roads.iter().take(3) {
                    println!("  - {} {}m", road.name, road.distance);
                }
            }
        }
        Err(e) => tracing::error!("reverse geocode failed: {}", e),
    }
    println!();
}

async fn ip_demo(client: &AmapClient) {
    println!("=== IP location ===");
    let ip = Ipv4Addr::new(114, 247, 50, 2);

    match client.ip(&IpRequest::new(ip)).await {
        Ok(resp) => {
            println!("ip:        {}", ip);
            println!("province:  {}", resp.province);
            println!("city:      {}", resp.city);
            println!("adcode:    {}", resp.adcode);
            println!("rectangle: {}", resp.rectangle);
        }
        Err(e) => tracing::error!("ip location failed: {}", e),
    }
    println!();

    println!("=== Current IP location ===");
    match client.current_ip().await {
        Ok(resp) => {
            println!("province:  {}", resp.province);
            println!("city:      {}", resp.city);
            println!("adcode:    {}", resp.adcode);
        }
        Err(e) => tracing::error!("current ip location failed: {}", e),
    }
    println!();
}

async fn cache_demo(client: &AmapClient) {
    if !client.is_cached() {
        return;
    }

    println!("=== Cache ===");
    let req = GeocodeRequest::new("上海市浦东新区陆家嘴环路1000号").city("上海");

    for attempt in ["first", "second"] {
        let start = Instant::now();
        match client.geocode(&req).await {
            Ok(_) => println!("{} call took {:?}", attempt, start.elapsed()),
            Err(e) => tracing::warn!("{} call failed: {}", attempt, e),
        }
    }
}
