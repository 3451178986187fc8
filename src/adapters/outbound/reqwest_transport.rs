//! Reqwest Transport
//!
//! Implements Transport over HTTPS using reqwest.
//!
//! See: https://lbs.amap.com/api/webservice/guide/api/georegeo

use crate::config::ClientConfig;
use crate::domain::entities::QueryParams;
use crate::domain::error::AmapError;
use crate::domain::ports::Transport;
use crate::domain::value_objects::ApiStatus;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;

/// Base URL of the AMap web service.
pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";

/// API version path segment.
pub const API_VERSION: &str = "v3";

/// HTTP transport for the AMap REST API.
///
/// Builds `<base>/v3/<endpoint>?<query>&key=<api-key>` and only hands back
/// bodies that are HTTP 200 with `status == "1"`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Per-request deadline overriding the client's own
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Create a transport with a pooled HTTP client built from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, AmapError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: None,
        })
    }

    /// Replace the underlying HTTP client.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Apply a deadline to every request, replacing the client's own.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, endpoint)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, endpoint: &str, query: &QueryParams) -> Result<Bytes, AmapError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!("GET {} query={:?}", url, query);

        let mut request = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            return Err(AmapError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        check_envelope(&body)?;
        Ok(body)
    }
}

/// Fail unless the body is a JSON envelope with `status == "1"`.
pub(crate) fn check_envelope(body: &[u8]) -> Result<(), AmapError> {
    let envelope: ApiStatus = serde_json::from_slice(body).map_err(AmapError::Decode)?;
    match envelope.to_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> ReqwestTransport {
        let config = ClientConfig::new("test-key").base_url(server.uri());
        ReqwestTransport::new(&config).unwrap()
    }

    // ===== Envelope Tests =====

    #[test]
    fn test_check_envelope_success() {
        assert!(check_envelope(br#"{"status":"1","info":"OK","infocode":"10000"}"#).is_ok());
    }

    #[test]
    fn test_check_envelope_upstream_error() {
        let result = check_envelope(br#"{"status":"0","info":"INVALID_USER_KEY","infocode":"10001"}"#);
        assert!(matches!(result, Err(AmapError::UpstreamApi { .. })));
    }

    #[test]
    fn test_check_envelope_malformed() {
        assert!(matches!(check_envelope(b"<html>"), Err(AmapError::Decode(_))));
        assert!(matches!(check_envelope(b"{}"), Err(AmapError::Decode(_))));
    }

    // ===== URL Tests =====

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let config = ClientConfig::new("k").base_url("https://example.com/");
        let transport = ReqwestTransport::new(&config).unwrap();

        assert_eq!(transport.base_url(), "https://example.com");
        assert_eq!(
            transport.endpoint_url("geocode/geo"),
            "https://example.com/v3/geocode/geo"
        );
    }

    // ===== Integration Tests with Mock HTTP Server =====

    #[tokio::test]
    async fn test_get_appends_query_and_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/geocode/geo"))
            .and(query_param("address", "望江西路"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "1", "info": "OK"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let query = vec![("address", "望江西路".to_string())];
        let body = transport.get("geocode/geo", &query).await.unwrap();

        assert!(!body.is_empty());
    }

    #[tokio::test]
    async fn test_get_http_error_carries_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/ip"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let result = transport.get("ip", &Vec::new()).await;

        match result {
            Err(AmapError::HttpStatus { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_non_200_success_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/ip"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let result = transport.get("ip", &Vec::new()).await;

        assert!(matches!(result, Err(AmapError::HttpStatus { status: 204, .. })));
    }

    #[tokio::test]
    async fn test_get_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/ip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "0",
                "info": "INVALID_USER_KEY",
                "infocode": "10001"
            })))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let result = transport.get("ip", &Vec::new()).await;

        match result {
            Err(AmapError::UpstreamApi { info, infocode }) => {
                assert_eq!(info, "INVALID_USER_KEY");
                assert_eq!(infocode, "10001");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_timeout_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/ip"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "1"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server).with_timeout(Duration::from_millis(50));
        let result = transport.get("ip", &Vec::new()).await;

        match result {
            Err(err @ AmapError::Network(_)) => assert!(err.is_retryable()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_connection_refused_is_network_error() {
        let config = ClientConfig::new("k").base_url("http://127.0.0.1:1");
        let transport = ReqwestTransport::new(&config).unwrap();

        let result = transport.get("ip", &Vec::new()).await;
        assert!(matches!(result, Err(AmapError::Network(_))));
    }

    #[tokio::test]
    async fn test_with_http_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/ip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let transport = transport_for(&mock_server).with_http_client(client);

        assert!(transport.get("ip", &Vec::new()).await.is_ok());
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestTransport>();
    }
}
