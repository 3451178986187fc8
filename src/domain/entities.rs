//! Domain Entities - Requests and responses of the AMap web service
//!
//! Requests are `Serialize` so they can double as cache key parameters; their
//! field order is fixed by declaration, which keeps fingerprints stable.
//! Responses are decoded with ordinary typed rules except for the fields
//! routed through [`crate::domain::tolerant`].

use crate::domain::tolerant::{flatten_business_areas, tolerant_string};
use crate::domain::value_objects::{ApiStatus, Extensions, LngLat};
use serde::{Deserialize, Serialize, Serializer};
use std::net::Ipv4Addr;

/// Query parameters for one outbound request, in insertion order.
pub type QueryParams = Vec<(&'static str, String)>;

// ===== Forward Geocoding =====

/// Address to coordinates lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeocodeRequest {
    /// Structured address, required
    pub address: String,
    /// Restrict the search to a city (name, citycode or adcode)
    #[serde(serialize_with = "serialize_non_empty")]
    pub city: Option<String>,
}

/// `Some("")` and `None` send the same query, so they share a cache key.
fn serialize_non_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.as_deref().filter(|v| !v.is_empty()).serialize(serializer)
}

impl GeocodeRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            city: None,
        }
    }

    /// Restrict the lookup to a city. An empty name clears the restriction.
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into()).filter(|c| !c.is_empty());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = vec![("address", self.address.clone())];
        if let Some(city) = self.city.as_ref().filter(|c| !c.is_empty()) {
            query.push(("city", city.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    pub count: String,
    pub geocodes: Vec<Geocode>,
}

/// One forward geocoding match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geocode {
    pub formatted_address: String,
    pub country: String,
    pub province: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub city: String,
    pub citycode: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub district: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub street: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub number: String,
    pub adcode: String,
    /// `"lng,lat"`
    pub location: String,
    /// Match level, e.g. `门牌号` or `兴趣点`
    pub level: String,
}

impl Geocode {
    pub fn coordinates(&self) -> Option<LngLat> {
        LngLat::parse(&self.location)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates().map(|p| p.lng)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates().map(|p| p.lat)
    }
}

// ===== Reverse Geocoding =====

/// Coordinates to address lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegeoRequest {
    /// `"lng,lat"`, required
    pub location: String,
    /// POI types to return nearby (joined with `|`)
    pub poi_types: Vec<String>,
    /// Search radius in meters, 0 leaves the server default (1000)
    pub radius: u32,
    pub extensions: Option<Extensions>,
    /// 1 = main roads only
    pub road_level: u8,
    /// POI ordering hint: 1 = home related, 2 = company related
    pub home_or_corp: u8,
}

impl RegeoRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn from_lng_lat(point: LngLat) -> Self {
        Self::new(point.to_string())
    }

    pub fn poi_types(mut self, types: Vec<String>) -> Self {
        self.poi_types = types;
        self
    }

    pub fn radius(mut self, meters: u32) -> Self {
        self.radius = meters;
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn road_level(mut self, level: u8) -> Self {
        self.road_level = level;
        self
    }

    pub fn home_or_corp(mut self, hint: u8) -> Self {
        self.home_or_corp = hint;
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = vec![("location", self.location.clone())];

        if !self.poi_types.is_empty() {
            query.push(("poitype", self.poi_types.join("|")));
        }
        if self.radius > 0 {
            query.push(("radius", self.radius.to_string()));
        }
        if let Some(extensions) = self.extensions {
            query.push(("extensions", extensions.as_str().to_string()));
        }
        if self.road_level > 0 {
            query.push(("roadlevel", self.road_level.to_string()));
        }
        if self.home_or_corp > 0 {
            query.push(("homeorcorp", self.home_or_corp.to_string()));
        }

        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegeoResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    pub regeocode: Regeocode,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Regeocode {
    /// Empty for points with no address (open sea)
    #[serde(deserialize_with = "tolerant_string")]
    pub formatted_address: String,
    #[serde(rename = "addressComponent")]
    pub address_component: AddressComponent,
    pub pois: Vec<Poi>,
    pub roads: Vec<Road>,
    pub roadinters: Vec<RoadInter>,
    pub aois: Vec<Aoi>,
    #[serde(rename = "businessAreas", deserialize_with = "flatten_business_areas")]
    pub business_areas: Vec<BusinessArea>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddressComponent {
    pub country: String,
    pub province: String,
    /// Empty array for municipalities
    #[serde(deserialize_with = "tolerant_string")]
    pub city: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub citycode: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub district: String,
    pub adcode: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub township: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub towncode: String,
    pub neighborhood: Neighborhood,
    pub building: Building,
    #[serde(rename = "streetNumber")]
    pub street_number: StreetNumber,
    #[serde(rename = "seaArea", deserialize_with = "tolerant_string")]
    pub sea_area: String,
    #[serde(rename = "businessAreas", deserialize_with = "flatten_business_areas")]
    pub business_areas: Vec<BusinessArea>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Neighborhood {
    #[serde(deserialize_with = "tolerant_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "tolerant_string")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Building {
    #[serde(deserialize_with = "tolerant_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "tolerant_string")]
    pub kind: String,
}

/// Nearest house number. Every field may arrive as a string or an array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreetNumber {
    #[serde(deserialize_with = "tolerant_string")]
    pub street: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub number: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub location: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub direction: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub distance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Poi {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub tel: String,
    pub distance: String,
    pub direction: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub address: String,
    pub location: String,
    #[serde(rename = "businessarea", deserialize_with = "tolerant_string")]
    pub business_area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Road {
    pub id: String,
    pub name: String,
    pub distance: String,
    pub direction: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoadInter {
    pub distance: String,
    pub direction: String,
    pub location: String,
    pub first_id: String,
    pub first_name: String,
    pub second_id: String,
    pub second_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BusinessArea {
    pub location: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Aoi {
    pub id: String,
    pub name: String,
    pub adcode: String,
    pub location: String,
    pub area: String,
    pub distance: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ===== IP Location =====

/// IP to city lookup. Only IPv4 is supported upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpRequest {
    /// Address to locate; `None` locates the caller's own public IP
    pub ip: Option<Ipv4Addr>,
}

impl IpRequest {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self { ip: Some(ip) }
    }

    pub fn to_query(&self) -> QueryParams {
        match self.ip {
            Some(ip) => vec![("ip", ip.to_string())],
            None => Vec::new(),
        }
    }
}

/// City-level location. Fields are empty arrays on the wire for foreign or
/// unknown addresses, which decode to empty strings here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IpResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(deserialize_with = "tolerant_string")]
    pub province: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub city: String,
    #[serde(deserialize_with = "tolerant_string")]
    pub adcode: String,
    /// Bounding box of the city, `"lng,lat;lng,lat"`
    #[serde(deserialize_with = "tolerant_string")]
    pub rectangle: String,
}
