//! Relationship lookups between records.
//!
//! Relationships are two one-directional lookups: owning collections are
//! found by foreign-key index (`missions.planet_id`, `missions.scientist_id`),
//! and mission back references are resolved by primary-key lookup. No live
//! object graph is kept.

use crate::model::mission::Mission;
use crate::model::planet::Planet;
use crate::model::scientist::Scientist;
use crate::model::validation::RecordId;
use crate::repo::error::RepoResult;
use crate::repo::mission_repo::{MissionListQuery, MissionRepository};
use crate::repo::planet_repo::PlanetRepository;
use crate::repo::scientist_repo::ScientistRepository;

/// Read-only relationship resolution used by accessors and serialization.
pub trait RelationLoader {
    fn find_planet(&self, id: RecordId) -> RepoResult<Option<Planet>>;
    fn find_scientist(&self, id: RecordId) -> RepoResult<Option<Scientist>>;
    /// Missions owned by the planet, ordered by id.
    fn missions_of_planet(&self, planet_id: RecordId) -> RepoResult<Vec<Mission>>;
    /// Missions owned by the scientist, ordered by id.
    fn missions_of_scientist(&self, scientist_id: RecordId) -> RepoResult<Vec<Mission>>;
}

impl<T> RelationLoader for T
where
    T: PlanetRepository + ScientistRepository + MissionRepository,
{
    fn find_planet(&self, id: RecordId) -> RepoResult<Option<Planet>> {
        self.get_planet(id)
    }

    fn find_scientist(&self, id: RecordId) -> RepoResult<Option<Scientist>> {
        self.get_scientist(id)
    }

    fn missions_of_planet(&self, planet_id: RecordId) -> RepoResult<Vec<Mission>> {
        self.list_missions(&MissionListQuery {
            planet_id: Some(planet_id),
            ..MissionListQuery::default()
        })
    }

    fn missions_of_scientist(&self, scientist_id: RecordId) -> RepoResult<Vec<Mission>> {
        self.list_missions(&MissionListQuery {
            scientist_id: Some(scientist_id),
            ..MissionListQuery::default()
        })
    }
}

impl Planet {
    /// Missions owned by this planet. Empty for an unsaved planet.
    pub fn missions(&self, loader: &impl RelationLoader) -> RepoResult<Vec<Mission>> {
        match self.id() {
            Some(id) => loader.missions_of_planet(id),
            None => Ok(Vec::new()),
        }
    }
}

impl Scientist {
    /// Missions owned by this scientist. Empty for an unsaved scientist.
    pub fn missions(&self, loader: &impl RelationLoader) -> RepoResult<Vec<Mission>> {
        match self.id() {
            Some(id) => loader.missions_of_scientist(id),
            None => Ok(Vec::new()),
        }
    }
}

impl Mission {
    /// Planet this mission belongs to, if the row still exists.
    pub fn planet(&self, loader: &impl RelationLoader) -> RepoResult<Option<Planet>> {
        loader.find_planet(self.planet_id())
    }

    /// Scientist this mission belongs to, if the row still exists.
    pub fn scientist(&self, loader: &impl RelationLoader) -> RepoResult<Option<Scientist>> {
        loader.find_scientist(self.scientist_id())
    }
}
