//! Cache Port
//!
//! Defines the storage capability used by the cache-aside executor.
//! Implementations may keep entries in process memory, in Redis, or nowhere.

use async_trait::async_trait;
use bytes::Bytes;

/// Key/value cache for raw response bodies.
///
/// This is an outbound port: the executor only ever calls `get` and `set` and
/// never looks at entries directly. Keys and values are opaque; a backend must
/// not interpret either.
///
/// Neither operation reports errors. A backend that can fail (network store,
/// full disk) must absorb the failure itself and behave like a miss.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Look up a key.
    ///
    /// `None` means not found (or expired). `Some` with an empty body is a
    /// legitimate hit.
    async fn get(&self, key: &str) -> Option<Bytes>;

    /// Insert or replace a value. The last `set` for a key wins.
    async fn set(&self, key: &str, value: Bytes);
}
