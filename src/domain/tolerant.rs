//! Tolerant Field Decoding
//!
//! Some AMap fields arrive as a plain string in one response and as an array
//! (usually `[]`) in another. These helpers collapse such values into a single
//! canonical string while the response is being decoded, so the rest of the
//! crate only ever sees `String`.
//!
//! Use them per field via `#[serde(default, deserialize_with = "...")]`. Fields
//! with a stable type keep ordinary typed decoding and fail loudly on mismatch.

use crate::domain::entities::BusinessArea;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Wire shape of a field whose JSON type is not fixed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmbiguousField {
    /// A plain string.
    Scalar(String),
    /// An array; only its first element is meaningful.
    List(Vec<Value>),
    /// Any other JSON value (number, object, bool, null).
    Other(Value),
}

impl AmbiguousField {
    /// Resolve to the canonical scalar.
    ///
    /// Strings pass through, arrays yield their first element when it is a
    /// string, and everything else yields an empty string.
    pub fn into_canonical(self) -> String {
        match self {
            AmbiguousField::Scalar(s) => s,
            AmbiguousField::List(items) => match items.into_iter().next() {
                Some(Value::String(s)) => s,
                _ => String::new(),
            },
            AmbiguousField::Other(_) => String::new(),
        }
    }
}

impl From<Value> for AmbiguousField {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(s) => AmbiguousField::Scalar(s),
            Value::Array(items) => AmbiguousField::List(items),
            other => AmbiguousField::Other(other),
        }
    }
}

/// `deserialize_with` adapter for string-or-array fields.
pub fn tolerant_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(AmbiguousField::deserialize(deserializer)?.into_canonical())
}

/// `businessAreas` comes back as `[{..}, {..}]` when populated and as `[[]]`
/// when empty.
///
/// `Group` must be tried first: a struct also decodes from a sequence, so
/// `[]` would otherwise become one default area.
#[derive(Deserialize)]
#[serde(untagged)]
enum BusinessAreaSlot {
    Group(Vec<BusinessArea>),
    Area(BusinessArea),
}

/// `deserialize_with` adapter flattening both business area layouts.
pub fn flatten_business_areas<'de, D>(deserializer: D) -> Result<Vec<BusinessArea>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots: Option<Vec<BusinessAreaSlot>> = Option::deserialize(deserializer)?;
    let mut areas = Vec::new();

    for slot in slots.unwrap_or_default() {
        match slot {
            BusinessAreaSlot::Area(area) => areas.push(area),
            BusinessAreaSlot::Group(group) => areas.extend(group),
        }
    }

    Ok(areas)
}
