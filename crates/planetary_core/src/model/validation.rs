//! Field-level validation shared by all records.
//!
//! # Responsibility
//! - Define the validation error taxonomy surfaced to API callers.
//! - Encode the "falsy" rejection rule for required text and id fields.
//!
//! # Invariants
//! - Falsy text is `None` or `""`. Whitespace-only text is accepted.
//! - Falsy ids are `None` or `0`. Negative ids are accepted.
//! - Validation fails on the first offending field; violations are never batched.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-generated surrogate key shared by every table.
pub type RecordId = i64;

/// Rejected field assignment.
///
/// `Display` renders the exact message reported to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    ScientistNameRequired,
    ScientistFieldOfStudyRequired,
    MissionNameRequired,
    MissionScientistIdRequired,
    MissionPlanetIdRequired,
}

impl ValidationError {
    /// Name of the rejected field, for metadata-only logging.
    pub fn field(&self) -> &'static str {
        match self {
            Self::ScientistNameRequired | Self::MissionNameRequired => "name",
            Self::ScientistFieldOfStudyRequired => "field_of_study",
            Self::MissionScientistIdRequired => "scientist_id",
            Self::MissionPlanetIdRequired => "planet_id",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::ScientistNameRequired => "Scientist must have a name.",
            Self::ScientistFieldOfStudyRequired => "Scientist must have a field of study.",
            Self::MissionNameRequired => "Mission must have name.",
            Self::MissionScientistIdRequired => "Mission must have scientist ID.",
            Self::MissionPlanetIdRequired => "Mission must have planet ID.",
        };
        f.write_str(message)
    }
}

impl Error for ValidationError {}

/// Text value accepted by validating setters.
///
/// Lets setters take `&str`, `String` and their `Option` forms, so an API
/// layer can forward a JSON `null` straight into validation.
pub trait TextInput {
    fn into_text(self) -> Option<String>;
}

impl TextInput for &str {
    fn into_text(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl TextInput for String {
    fn into_text(self) -> Option<String> {
        Some(self)
    }
}

impl TextInput for Option<&str> {
    fn into_text(self) -> Option<String> {
        self.map(str::to_string)
    }
}

impl TextInput for Option<String> {
    fn into_text(self) -> Option<String> {
        self
    }
}

/// Returns the text when it is truthy, otherwise `error`.
pub fn require_text(value: Option<String>, error: ValidationError) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(error),
    }
}

/// Returns the id when it is truthy, otherwise `error`.
///
/// `0` is rejected alongside `None`; see DESIGN.md on the zero-id question.
pub fn require_id(value: Option<RecordId>, error: ValidationError) -> Result<RecordId, ValidationError> {
    match value {
        Some(id) if id != 0 => Ok(id),
        _ => Err(error),
    }
}
