//! Request Fingerprinting
//!
//! Derives cache keys from an operation name and its parameters.
//! Pure domain logic, no I/O.

use crate::domain::error::AmapError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute the cache key for `params` under `namespace`.
///
/// The parameters are serialized to JSON, hashed with SHA-256 and the hex
/// digest is appended to the namespace: `"<namespace>:<hex>"`. Keeping the
/// namespace readable in the key means two operations can never share an
/// entry even when their parameters serialize identically.
///
/// Serialization must be deterministic: structs serialize in declaration
/// order, but a `HashMap` does not, so use `BTreeMap` for map-shaped
/// parameters. The namespace is not validated; callers pick one per endpoint.
///
/// # Example
/// ```
/// use amap_client::fingerprint;
///
/// let key = fingerprint("ip", &serde_json::json!({"ip": "114.247.50.2"})).unwrap();
/// assert!(key.starts_with("ip:"));
/// ```
pub fn fingerprint<P>(namespace: &str, params: &P) -> Result<String, AmapError>
where
    P: Serialize + ?Sized,
{
    let encoded = serde_json::to_vec(params).map_err(AmapError::Encoding)?;
    let digest = Sha256::digest(&encoded);
    Ok(format!("{}:{}", namespace, hex::encode(digest)))
}
