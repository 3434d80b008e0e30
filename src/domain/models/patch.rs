//! Helpers for PATCH payloads where "absent" and "null" mean different things.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that was present in the payload.
///
/// Combined with `#[serde(default)]` this yields `None` for an absent key,
/// `Some(None)` for an explicit `null` and `Some(Some(v))` for a value.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
