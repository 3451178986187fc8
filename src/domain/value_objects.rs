//! Value Objects - Immutable domain primitives
//!
//! Small types shared by requests and responses: coordinates, the
//! reverse-geocoding detail level, and the status envelope every AMap
//! response carries.

use crate::domain::error::AmapError;
use serde::{Deserialize, Serialize};

/// A GCJ-02 coordinate pair as used by the AMap API.
///
/// On the wire coordinates are a single `"lng,lat"` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Parse a `"lng,lat"` string.
    ///
    /// # Examples
    /// ```
    /// use amap_client::LngLat;
    ///
    /// let p = LngLat::parse("116.481488,39.990464").unwrap();
    /// assert_eq!(p.lng, 116.481488);
    /// assert!(LngLat::parse("").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (lng, lat) = s.split_once(',')?;
        let lng = lng.trim().parse().ok()?;
        let lat = lat.trim().parse().ok()?;
        Some(Self { lng, lat })
    }
}

impl std::fmt::Display for LngLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// Detail level for reverse geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extensions {
    /// Address components only (server default)
    Base,
    /// Address components plus nearby POIs, roads, intersections and AOIs
    All,
}

impl Extensions {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status envelope shared by every response.
///
/// `status` is `"1"` on success; otherwise `info` and `infocode` describe the
/// failure (e.g. `INVALID_USER_KEY` / `10001`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub infocode: String,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        self.status == "1"
    }

    /// The upstream failure, if the envelope reports one.
    pub fn to_error(&self) -> Option<AmapError> {
        if self.is_success() {
            return None;
        }
        Some(AmapError::UpstreamApi {
            info: self.info.clone(),
            infocode: self.infocode.clone(),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    // ===== LngLat Tests =====

    #[test]
    fn test_lnglat_parse() {
        let p = LngLat::parse("117.100235,31.832138").unwrap();
        assert_eq!(p.lng, 117.100235);
        assert_eq!(p.lat, 31.832138);
    }

    #[test]
    fn test_lnglat_parse_with_spaces() {
        let p = LngLat::parse(" 116.3 , 39.9 ").unwrap();
        assert_eq!(p, LngLat::new(116.3, 39.9));
    }

    #[test]
    fn test_lnglat_parse_invalid() {
        let invalid_inputs = vec!["", "116.3", "abc,39.9", "116.3,", ",39.9", "116.3;39.9"];

        for input in invalid_inputs {
            assert!(LngLat::parse(input).is_none(), "Parsed invalid input: {}", input);
        }
    }

    #[test]
    fn test_lnglat_display_round_trips() {
        let p = LngLat::new(116.310003, 39.991957);
        assert_eq!(p.to_string(), "116.310003,39.991957");
        assert_eq!(LngLat::parse(&p.to_string()), Some(p));
    }

    // ===== Extensions Tests =====

    #[test]
    fn test_extensions_as_str() {
        assert_eq!(Extensions::Base.as_str(), "base");
        assert_eq!(Extensions::All.as_str(), "all");
        assert_eq!(Extensions::All.to_string(), "all");
    }

    #[test]
    fn test_extensions_serde() {
        assert_eq!(serde_json::to_string(&Extensions::All).unwrap(), "\"all\"");
        let parsed: Extensions = serde_json::from_str("\"base\"").unwrap();
        assert_eq!(parsed, Extensions::Base);
    }

    // ===== ApiStatus Tests =====

    #[test]
    fn test_status_success() {
        let status: ApiStatus =
            serde_json::from_str(r#"{"status":"1","info":"OK","infocode":"10000"}"#).unwrap();
        assert!(status.is_success());
        assert!(status.to_error().is_none());
    }

    #[test]
    fn test_status_failure_carries_info() {
        let status: ApiStatus = serde_json::from_str(
            r#"{"status":"0","info":"INVALID_USER_KEY","infocode":"10001"}"#,
        )
        .unwrap();
        assert!(!status.is_success());

        match status.to_error() {
            Some(AmapError::UpstreamApi { info, infocode }) => {
                assert_eq!(info, "INVALID_USER_KEY");
                assert_eq!(infocode, "10001");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_status_requires_status_field() {
        let result = serde_json::from_str::<ApiStatus>(r#"{"info":"OK"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_ignores_unknown_fields() {
        let status: ApiStatus =
            serde_json::from_str(r#"{"status":"1","count":"1","geocodes":[]}"#).unwrap();
        assert!(status.is_success());
        assert_eq!(status.info, "");
    }
}
