//! Serde helper functions for patch deserialization.
//!
//! A nullable field in a patch has three states: absent (keep the stored
//! value), `null` (clear it) and a value (replace it). These helpers map them
//! onto `Option<Option<T>>` as `None`, `Some(None)` and `Some(Some(v))`.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that is present in the payload, keeping explicit
/// `null` apart from absence.
///
/// Must be combined with `#[serde(default)]` so that an absent field falls
/// back to `None`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
