//! Record use-case service for the API layer.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete entry points per entity.
//! - Turn API payloads (drafts, patches) into validated records.
//! - Serialize records with their relationships.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Updates are read-modify-write: patch validation runs before any SQL.
//! - Logged events carry ids and field names only, never field values.

use crate::model::mission::{Mission, MissionDraft, MissionPatch};
use crate::model::planet::{Planet, PlanetPatch};
use crate::model::scientist::{Scientist, ScientistDraft, ScientistPatch};
use crate::model::validation::{RecordId, ValidationError};
use crate::repo::error::RepoError;
use crate::repo::mission_repo::{MissionListQuery, MissionRepository};
use crate::repo::planet_repo::PlanetRepository;
use crate::repo::scientist_repo::ScientistRepository;
use crate::repo::ListQuery;
use crate::serialize::{InvalidRule, SerializeRecord, SerializeRules};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Payload JSON does not match the expected shape.
    Payload(String),
    /// Caller-supplied serialization rule is malformed.
    Rules(InvalidRule),
    /// Field assignment was rejected.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound { entity: &'static str, id: RecordId },
    /// Storage rejected the write (dangling foreign key, constraint).
    Integrity(String),
    /// Other persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload(message) => write!(f, "invalid payload: {message}"),
            Self::Rules(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Integrity(message) => write!(f, "integrity violation: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rules(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Integrity(message) => Self::Integrity(message),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<InvalidRule> for ServiceError {
    fn from(value: InvalidRule) -> Self {
        Self::Rules(value)
    }
}

/// Outcome of deleting a planet or scientist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Ids of the missions removed together with the parent, ascending.
    pub deleted_missions: Vec<RecordId>,
}

/// Decodes an API payload into a draft or patch type.
pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> ServiceResult<T> {
    serde_json::from_value(payload).map_err(|err| ServiceError::Payload(err.to_string()))
}

/// Use-case facade over a repository implementing all three entities.
pub struct RecordService<R> {
    repo: R,
}

impl<R> RecordService<R>
where
    R: PlanetRepository + ScientistRepository + MissionRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Inserts a planet and returns the stored record.
    pub fn create_planet(&self, planet: &Planet) -> ServiceResult<Planet> {
        let id = self.repo.create_planet(planet)?;
        log_write("record_create", "planet", id);
        self.get_planet(id)
    }

    pub fn get_planet(&self, id: RecordId) -> ServiceResult<Planet> {
        self.repo.get_planet(id)?.ok_or(ServiceError::NotFound {
            entity: "planet",
            id,
        })
    }

    pub fn list_planets(&self, query: &ListQuery) -> ServiceResult<Vec<Planet>> {
        Ok(self.repo.list_planets(query)?)
    }

    pub fn update_planet(&self, id: RecordId, patch: PlanetPatch) -> ServiceResult<Planet> {
        let mut planet = self.get_planet(id)?;
        planet.apply_patch(patch);
        self.repo.update_planet(&planet)?;
        log_write("record_update", "planet", id);
        Ok(planet)
    }

    /// Deletes a planet together with every mission it owns.
    pub fn delete_planet(&self, id: RecordId) -> ServiceResult<CascadeReport> {
        let deleted_missions = self.repo.delete_planet(id)?;
        info!(
            "event=record_delete module=service status=ok entity=planet id={} missions_deleted={}",
            id,
            deleted_missions.len()
        );
        Ok(CascadeReport { deleted_missions })
    }

    /// Validates a draft, inserts it and returns the stored scientist.
    pub fn create_scientist(&self, draft: ScientistDraft) -> ServiceResult<Scientist> {
        let scientist = Scientist::try_from(draft).map_err(|err| rejected("scientist", err))?;
        let id = self.repo.create_scientist(&scientist)?;
        log_write("record_create", "scientist", id);
        self.get_scientist(id)
    }

    pub fn get_scientist(&self, id: RecordId) -> ServiceResult<Scientist> {
        self.repo.get_scientist(id)?.ok_or(ServiceError::NotFound {
            entity: "scientist",
            id,
        })
    }

    pub fn list_scientists(&self, query: &ListQuery) -> ServiceResult<Vec<Scientist>> {
        Ok(self.repo.list_scientists(query)?)
    }

    pub fn update_scientist(&self, id: RecordId, patch: ScientistPatch) -> ServiceResult<Scientist> {
        let mut scientist = self.get_scientist(id)?;
        scientist
            .apply_patch(patch)
            .map_err(|err| rejected("scientist", err))?;
        self.repo.update_scientist(&scientist)?;
        log_write("record_update", "scientist", id);
        Ok(scientist)
    }

    /// Deletes a scientist together with every mission they own.
    pub fn delete_scientist(&self, id: RecordId) -> ServiceResult<CascadeReport> {
        let deleted_missions = self.repo.delete_scientist(id)?;
        info!(
            "event=record_delete module=service status=ok entity=scientist id={} missions_deleted={}",
            id,
            deleted_missions.len()
        );
        Ok(CascadeReport { deleted_missions })
    }

    /// Validates a draft, inserts it and returns the stored mission.
    ///
    /// A draft referencing a missing planet or scientist passes validation
    /// and fails at storage with `ServiceError::Integrity`.
    pub fn create_mission(&self, draft: MissionDraft) -> ServiceResult<Mission> {
        let mission = Mission::try_from(draft).map_err(|err| rejected("mission", err))?;
        let id = self.repo.create_mission(&mission)?;
        log_write("record_create", "mission", id);
        self.get_mission(id)
    }

    pub fn get_mission(&self, id: RecordId) -> ServiceResult<Mission> {
        self.repo.get_mission(id)?.ok_or(ServiceError::NotFound {
            entity: "mission",
            id,
        })
    }

    pub fn list_missions(&self, query: &MissionListQuery) -> ServiceResult<Vec<Mission>> {
        Ok(self.repo.list_missions(query)?)
    }

    pub fn update_mission(&self, id: RecordId, patch: MissionPatch) -> ServiceResult<Mission> {
        let mut mission = self.get_mission(id)?;
        mission
            .apply_patch(patch)
            .map_err(|err| rejected("mission", err))?;
        self.repo.update_mission(&mission)?;
        log_write("record_update", "mission", id);
        Ok(mission)
    }

    pub fn delete_mission(&self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete_mission(id)?;
        log_write("record_delete", "mission", id);
        Ok(())
    }

    /// Serializes a record with its default rules.
    pub fn to_json<T: SerializeRecord>(&self, record: &T) -> ServiceResult<Value> {
        Ok(record.to_json(&self.repo)?)
    }

    /// Serializes a record with its default rules plus `extra_rules`
    /// (each written as `-path.to.field`).
    pub fn serialize<T, S>(&self, record: &T, extra_rules: &[S]) -> ServiceResult<Value>
    where
        T: SerializeRecord,
        S: AsRef<str>,
    {
        let rules = SerializeRules::parse(extra_rules)?;
        Ok(record.to_json_with(&self.repo, &rules)?)
    }
}

fn log_write(event: &str, entity: &str, id: RecordId) {
    info!("event={event} module=service status=ok entity={entity} id={id}");
}

fn rejected(entity: &str, err: ValidationError) -> ServiceError {
    warn!(
        "event=record_validate module=service status=rejected entity={} field={}",
        entity,
        err.field()
    );
    ServiceError::Validation(err)
}
