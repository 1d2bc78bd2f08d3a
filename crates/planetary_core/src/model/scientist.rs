//! Scientist record.
//!
//! # Invariants
//! - `name` and `field_of_study` are never empty.
//! - Every mutation path (constructor, setters, draft, patch, deserialization)
//!   goes through the same validating setters.

use crate::model::deserialize_present;
use crate::model::validation::{require_text, RecordId, TextInput, ValidationError};
use serde::{Deserialize, Serialize};

/// Researcher that owns zero or more missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScientistDraft")]
pub struct Scientist {
    id: Option<RecordId>,
    name: String,
    field_of_study: String,
}

/// Creation payload for a scientist, validated on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScientistDraft {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
}

/// Partial update for a scientist.
///
/// Absent keys are left untouched; explicit `null` is validated and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScientistPatch {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub field_of_study: Option<Option<String>>,
}

impl Scientist {
    /// Creates an unsaved scientist.
    ///
    /// # Errors
    /// - `ScientistNameRequired` when `name` is empty or missing.
    /// - `ScientistFieldOfStudyRequired` when `field_of_study` is empty or missing.
    pub fn new(name: impl TextInput, field_of_study: impl TextInput) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            name: require_text(name.into_text(), ValidationError::ScientistNameRequired)?,
            field_of_study: require_text(
                field_of_study.into_text(),
                ValidationError::ScientistFieldOfStudyRequired,
            )?,
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

    pub fn field_of_study(&self) -> &str {
        &self.field_of_study
    }

    pub fn set_name(&mut self, value: impl TextInput) -> Result<(), ValidationError> {
        self.name = require_text(value.into_text(), ValidationError::ScientistNameRequired)?;
        Ok(())
    }

    pub fn set_field_of_study(&mut self, value: impl TextInput) -> Result<(), ValidationError> {
        self.field_of_study = require_text(
            value.into_text(),
            ValidationError::ScientistFieldOfStudyRequired,
        )?;
        Ok(())
    }

    /// Applies a partial update atomically.
    ///
    /// On error the scientist is left exactly as it was.
    pub fn apply_patch(&mut self, patch: ScientistPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.set_name(name)?;
        }
        if let Some(field_of_study) = patch.field_of_study {
            next.set_field_of_study(field_of_study)?;
        }
        *self = next;
        Ok(())
    }
}

impl TryFrom<ScientistDraft> for Scientist {
    type Error = ValidationError;

    fn try_from(draft: ScientistDraft) -> Result<Self, Self::Error> {
        Self::new(draft.name, draft.field_of_study)
    }
}

#[cfg(test)]
mod tests {
    use super::{Scientist, ScientistPatch};
    use crate::model::validation::ValidationError;

    #[test]
    fn failed_patch_leaves_record_unchanged() {
        let mut scientist = Scientist::new("Ada", "Astrophysics").unwrap();
        let patch = ScientistPatch {
            name: Some(Some("Grace".to_string())),
            field_of_study: Some(None),
        };

        let err = scientist.apply_patch(patch).unwrap_err();
        assert_eq!(err, ValidationError::ScientistFieldOfStudyRequired);
        assert_eq!(scientist.name(), "Ada");
        assert_eq!(scientist.field_of_study(), "Astrophysics");
    }

    #[test]
    fn name_is_checked_before_field_of_study() {
        let err = Scientist::new("", "").unwrap_err();
        assert_eq!(err, ValidationError::ScientistNameRequired);
    }
}
