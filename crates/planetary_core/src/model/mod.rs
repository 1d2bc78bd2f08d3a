//! Domain records for planets, scientists and missions.
//!
//! # Responsibility
//! - Define the canonical record shapes used by repositories and services.
//! - Run field validation at assignment time, before any persistence call.
//!
//! # Invariants
//! - Records with an `id` were read back from storage; `id == None` means unsaved.
//! - A `Scientist` or `Mission` value never holds a falsy required field.
//! - Relationships are not stored on records; they are resolved by query.

pub mod mission;
pub mod planet;
pub mod scientist;
pub mod validation;

use serde::{Deserialize, Deserializer};

/// Deserializes a field that distinguishes "absent" from explicit `null`.
///
/// Used with `#[serde(default)]`: absent keys stay `None`, `null` becomes
/// `Some(None)`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
