//! Planet record.
//!
//! Planets carry no required fields; every column is optional.

use crate::model::deserialize_present;
use crate::model::validation::RecordId;
use serde::{Deserialize, Serialize};

/// Celestial body that owns zero or more missions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Storage-generated id. Ignored on deserialization.
    #[serde(skip_deserializing)]
    pub(crate) id: Option<RecordId>,
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

/// Partial update for a planet.
///
/// Absent keys are left untouched; explicit `null` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanetPatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub distance_from_earth: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub nearest_star: Option<Option<String>>,
}

impl Planet {
    /// Creates an unsaved planet with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub(crate) fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Storage id, `None` until the planet is inserted.
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Applies a partial update. Planets have no validated fields.
    pub fn apply_patch(&mut self, patch: PlanetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(distance) = patch.distance_from_earth {
            self.distance_from_earth = distance;
        }
        if let Some(star) = patch.nearest_star {
            self.nearest_star = star;
        }
    }
}
