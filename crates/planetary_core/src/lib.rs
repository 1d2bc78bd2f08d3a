//! Core data layer for planets, scientists and the missions linking them.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod serialize;
pub mod service;

pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::mission::{Mission, MissionDraft, MissionPatch};
pub use model::planet::{Planet, PlanetPatch};
pub use model::scientist::{Scientist, ScientistDraft, ScientistPatch};
pub use model::validation::{RecordId, TextInput, ValidationError};
pub use repo::error::{RepoError, RepoResult};
pub use repo::mission_repo::{MissionListQuery, MissionRepository};
pub use repo::planet_repo::PlanetRepository;
pub use repo::relation::RelationLoader;
pub use repo::scientist_repo::ScientistRepository;
pub use repo::sqlite::SqliteRepository;
pub use repo::ListQuery;
pub use serialize::{InvalidRule, SerializeRecord, SerializeRules};
pub use service::record_service::{
    parse_payload, CascadeReport, RecordService, ServiceError, ServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
