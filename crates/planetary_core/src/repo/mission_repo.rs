//! Mission repository contract and SQLite implementation.
//!
//! # Invariants
//! - Parent existence is enforced by storage foreign keys; a dangling
//!   `planet_id`/`scientist_id` surfaces as `RepoError::Integrity`.
//! - Listing is ordered by `id ASC`.

use crate::model::mission::Mission;
use crate::model::validation::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sqlite::{pagination_clause, SqliteRepository};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const MISSION_SELECT_SQL: &str = "SELECT
    id,
    name,
    planet_id,
    scientist_id
FROM missions";

/// Query options for listing missions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionListQuery {
    pub planet_id: Option<RecordId>,
    pub scientist_id: Option<RecordId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for mission CRUD.
pub trait MissionRepository {
    fn create_mission(&self, mission: &Mission) -> RepoResult<RecordId>;
    fn update_mission(&self, mission: &Mission) -> RepoResult<()>;
    fn get_mission(&self, id: RecordId) -> RepoResult<Option<Mission>>;
    fn list_missions(&self, query: &MissionListQuery) -> RepoResult<Vec<Mission>>;
    fn delete_mission(&self, id: RecordId) -> RepoResult<()>;
}

impl MissionRepository for SqliteRepository<'_> {
    fn create_mission(&self, mission: &Mission) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO missions (name, planet_id, scientist_id) VALUES (?1, ?2, ?3);",
            params![mission.name(), mission.planet_id(), mission.scientist_id()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_mission(&self, mission: &Mission) -> RepoResult<()> {
        let id = mission.id().ok_or(RepoError::Unsaved("mission"))?;
        let changed = self.conn.execute(
            "UPDATE missions
             SET
                name = ?1,
                planet_id = ?2,
                scientist_id = ?3
             WHERE id = ?4;",
            params![mission.name(), mission.planet_id(), mission.scientist_id(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "mission",
                id,
            });
        }

        Ok(())
    }

    fn get_mission(&self, id: RecordId) -> RepoResult<Option<Mission>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MISSION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_mission_row(row)?));
        }
        Ok(None)
    }

    fn list_missions(&self, query: &MissionListQuery) -> RepoResult<Vec<Mission>> {
        let mut sql = format!("{MISSION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(planet_id) = query.planet_id {
            sql.push_str(" AND planet_id = ?");
            bind_values.push(Value::Integer(planet_id));
        }

        if let Some(scientist_id) = query.scientist_id {
            sql.push_str(" AND scientist_id = ?");
            bind_values.push(Value::Integer(scientist_id));
        }

        sql.push_str(" ORDER BY id ASC");
        sql.push_str(&pagination_clause(query.limit, query.offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut missions = Vec::new();
        while let Some(row) = rows.next()? {
            missions.push(parse_mission_row(row)?);
        }
        Ok(missions)
    }

    fn delete_mission(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM missions WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "mission",
                id,
            });
        }

        Ok(())
    }
}

fn parse_mission_row(row: &Row<'_>) -> RepoResult<Mission> {
    let id: RecordId = row.get("id")?;
    let name: Option<String> = row.get("name")?;
    let planet_id: Option<RecordId> = row.get("planet_id")?;
    let scientist_id: Option<RecordId> = row.get("scientist_id")?;
    let mission = Mission::new(name, planet_id, scientist_id)
        .map_err(|err| RepoError::InvalidData(format!("missions row {id}: {err}")))?;
    Ok(mission.with_id(id))
}
