//! Mission record: the join between one planet and one scientist.
//!
//! # Invariants
//! - `name` is never empty.
//! - `planet_id` and `scientist_id` are never zero. Whether they point at
//!   existing rows is enforced by storage foreign keys, not here.

use crate::model::deserialize_present;
use crate::model::validation::{require_id, require_text, RecordId, TextInput, ValidationError};
use serde::{Deserialize, Serialize};

/// Mission linking a planet and a scientist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MissionDraft")]
pub struct Mission {
    id: Option<RecordId>,
    name: String,
    planet_id: RecordId,
    scientist_id: RecordId,
}

/// Creation payload for a mission, validated on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MissionDraft {
    pub name: Option<String>,
    pub planet_id: Option<RecordId>,
    pub scientist_id: Option<RecordId>,
}

/// Partial update for a mission.
///
/// Absent keys are left untouched; explicit `null` is validated and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionPatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub planet_id: Option<Option<RecordId>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub scientist_id: Option<Option<RecordId>>,
}

impl Mission {
    /// Creates an unsaved mission.
    ///
    /// Fields are validated in the order `name`, `scientist_id`, `planet_id`;
    /// the first failure is returned.
    pub fn new(
        name: impl TextInput,
        planet_id: Option<RecordId>,
        scientist_id: Option<RecordId>,
    ) -> Result<Self, ValidationError> {
        let name = require_text(name.into_text(), ValidationError::MissionNameRequired)?;
        let scientist_id = require_id(scientist_id, ValidationError::MissionScientistIdRequired)?;
        let planet_id = require_id(planet_id, ValidationError::MissionPlanetIdRequired)?;
        Ok(Self {
            id: None,
            name,
            planet_id,
            scientist_id,
        })
    }

    pub(crate) fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn planet_id(&self) -> RecordId {
        self.planet_id
    }

    pub fn scientist_id(&self) -> RecordId {
        self.scientist_id
    }

    pub fn set_name(&mut self, value: impl TextInput) -> Result<(), ValidationError> {
        self.name = require_text(value.into_text(), ValidationError::MissionNameRequired)?;
        Ok(())
    }

    pub fn set_planet_id(&mut self, value: Option<RecordId>) -> Result<(), ValidationError> {
        self.planet_id = require_id(value, ValidationError::MissionPlanetIdRequired)?;
        Ok(())
    }

    pub fn set_scientist_id(&mut self, value: Option<RecordId>) -> Result<(), ValidationError> {
        self.scientist_id = require_id(value, ValidationError::MissionScientistIdRequired)?;
        Ok(())
    }

    /// Applies a partial update atomically.
    ///
    /// On error the mission is left exactly as it was.
    pub fn apply_patch(&mut self, patch: MissionPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.set_name(name)?;
        }
        if let Some(scientist_id) = patch.scientist_id {
            next.set_scientist_id(scientist_id)?;
        }
        if let Some(planet_id) = patch.planet_id {
            next.set_planet_id(planet_id)?;
        }
        *self = next;
        Ok(())
    }
}

impl TryFrom<MissionDraft> for Mission {
    type Error = ValidationError;

    fn try_from(draft: MissionDraft) -> Result<Self, Self::Error> {
        Self::new(draft.name, draft.planet_id, draft.scientist_id)
    }
}
