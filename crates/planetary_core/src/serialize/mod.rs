//! Cycle-free serialization of record graphs.
//!
//! # Responsibility
//! - Flatten a record and its related records into `serde_json::Value`.
//! - Apply per-entity default exclusion rules plus caller-supplied rules.
//!
//! # Invariants
//! - Planet drops `missions.planet`; Scientist drops `missions.scientist`;
//!   Mission drops `planet.missions` and `scientist.missions`.
//! - Descending into a related record merges the inherited rules with that
//!   record's own defaults.
//! - A record already on the current path is never serialized beneath
//!   itself, so the walk always terminates.

pub mod rules;

use crate::model::mission::Mission;
use crate::model::planet::Planet;
use crate::model::scientist::Scientist;
use crate::model::validation::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::relation::RelationLoader;
use serde::Serialize;
use serde_json::{Map, Value};

pub use rules::{InvalidRule, SerializeRules};

const PLANET_RULES: &[&str] = &["missions.planet"];
const SCIENTIST_RULES: &[&str] = &["missions.scientist"];
const MISSION_RULES: &[&str] = &["planet.missions", "scientist.missions"];

/// Record that can be serialized together with its relationships.
pub trait SerializeRecord {
    /// Serializes with this record's default rules.
    fn to_json<L: RelationLoader + ?Sized>(&self, loader: &L) -> RepoResult<Value> {
        self.to_json_with(loader, &SerializeRules::none())
    }

    /// Serializes with default rules plus `extra` exclusions.
    fn to_json_with<L: RelationLoader + ?Sized>(
        &self,
        loader: &L,
        extra: &SerializeRules,
    ) -> RepoResult<Value>;
}

impl SerializeRecord for Planet {
    fn to_json_with<L: RelationLoader + ?Sized>(
        &self,
        loader: &L,
        extra: &SerializeRules,
    ) -> RepoResult<Value> {
        Walker::new(loader).planet(self, extra).map(Value::Object)
    }
}

impl SerializeRecord for Scientist {
    fn to_json_with<L: RelationLoader + ?Sized>(
        &self,
        loader: &L,
        extra: &SerializeRules,
    ) -> RepoResult<Value> {
        Walker::new(loader).scientist(self, extra).map(Value::Object)
    }
}

impl SerializeRecord for Mission {
    fn to_json_with<L: RelationLoader + ?Sized>(
        &self,
        loader: &L,
        extra: &SerializeRules,
    ) -> RepoResult<Value> {
        Walker::new(loader).mission(self, extra).map(Value::Object)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Planet(RecordId),
    Scientist(RecordId),
    Mission(RecordId),
}

struct Walker<'a, L: RelationLoader + ?Sized> {
    loader: &'a L,
    /// Records currently being serialized, outermost first.
    path: Vec<Node>,
}

impl<'a, L: RelationLoader + ?Sized> Walker<'a, L> {
    fn new(loader: &'a L) -> Self {
        Self {
            loader,
            path: Vec::new(),
        }
    }

    fn on_path(&self, node: Node) -> bool {
        self.path.contains(&node)
    }

    fn planet(&mut self, planet: &Planet, inherited: &SerializeRules) -> RepoResult<Map<String, Value>> {
        let rules = inherited.merged(&SerializeRules::from_paths(PLANET_RULES));
        let mut map = columns(planet, &rules)?;

        if !rules.excludes("missions") {
            let missions = match planet.id() {
                Some(id) => {
                    self.path.push(Node::Planet(id));
                    let missions = self.loader.missions_of_planet(id);
                    let items = missions.and_then(|missions| {
                        self.missions(&missions, &rules.descend("missions"))
                    });
                    self.path.pop();
                    items?
                }
                None => Vec::new(),
            };
            map.insert("missions".to_string(), Value::Array(missions));
        }

        Ok(map)
    }

    fn scientist(
        &mut self,
        scientist: &Scientist,
        inherited: &SerializeRules,
    ) -> RepoResult<Map<String, Value>> {
        let rules = inherited.merged(&SerializeRules::from_paths(SCIENTIST_RULES));
        let mut map = columns(scientist, &rules)?;

        if !rules.excludes("missions") {
            let missions = match scientist.id() {
                Some(id) => {
                    self.path.push(Node::Scientist(id));
                    let missions = self.loader.missions_of_scientist(id);
                    let items = missions.and_then(|missions| {
                        self.missions(&missions, &rules.descend("missions"))
                    });
                    self.path.pop();
                    items?
                }
                None => Vec::new(),
            };
            map.insert("missions".to_string(), Value::Array(missions));
        }

        Ok(map)
    }

    fn missions(&mut self, missions: &[Mission], rules: &SerializeRules) -> RepoResult<Vec<Value>> {
        let mut items = Vec::with_capacity(missions.len());
        for mission in missions {
            if mission
                .id()
                .is_some_and(|id| self.on_path(Node::Mission(id)))
            {
                continue;
            }
            items.push(Value::Object(self.mission(mission, rules)?));
        }
        Ok(items)
    }

    fn mission(&mut self, mission: &Mission, inherited: &SerializeRules) -> RepoResult<Map<String, Value>> {
        let rules = inherited.merged(&SerializeRules::from_paths(MISSION_RULES));
        let mut map = columns(mission, &rules)?;

        let entered = mission.id().map(Node::Mission);
        if let Some(node) = entered {
            self.path.push(node);
        }
        let result = self.mission_references(mission, &rules, &mut map);
        if entered.is_some() {
            self.path.pop();
        }
        result?;

        Ok(map)
    }

    fn mission_references(
        &mut self,
        mission: &Mission,
        rules: &SerializeRules,
        map: &mut Map<String, Value>,
    ) -> RepoResult<()> {
        let planet_id = mission.planet_id();
        if !rules.excludes("planet") && !self.on_path(Node::Planet(planet_id)) {
            let value = match self.loader.find_planet(planet_id)? {
                Some(planet) => Value::Object(self.planet(&planet, &rules.descend("planet"))?),
                None => Value::Null,
            };
            map.insert("planet".to_string(), value);
        }

        let scientist_id = mission.scientist_id();
        if !rules.excludes("scientist") && !self.on_path(Node::Scientist(scientist_id)) {
            let value = match self.loader.find_scientist(scientist_id)? {
                Some(scientist) => {
                    Value::Object(self.scientist(&scientist, &rules.descend("scientist"))?)
                }
                None => Value::Null,
            };
            map.insert("scientist".to_string(), value);
        }

        Ok(())
    }
}

/// Serializes the column fields of a record, minus excluded keys.
fn columns<T: Serialize>(record: &T, rules: &SerializeRules) -> RepoResult<Map<String, Value>> {
    let mut map = match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(RepoError::InvalidData(format!(
                "record serialized to non-object value: {other}"
            )))
        }
        Err(err) => return Err(RepoError::InvalidData(err.to_string())),
    };
    map.retain(|key, _| !rules.excludes(key));
    Ok(map)
}
