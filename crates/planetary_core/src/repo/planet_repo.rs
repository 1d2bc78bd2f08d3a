//! Planet repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a planet deletes its missions in the same transaction.
//! - Listing is ordered by `id ASC`.

use crate::model::planet::Planet;
use crate::model::validation::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sqlite::{delete_cascading, pagination_clause, SqliteRepository, PLANET_OWNER};
use crate::repo::ListQuery;
use rusqlite::{params, OptionalExtension, Row};

const PLANET_SELECT_SQL: &str = "SELECT
    id,
    name,
    distance_from_earth,
    nearest_star
FROM planets";

/// Repository interface for planet CRUD.
pub trait PlanetRepository {
    /// Inserts a new row and returns its generated id. Any existing `id` on
    /// the input is ignored.
    fn create_planet(&self, planet: &Planet) -> RepoResult<RecordId>;
    fn update_planet(&self, planet: &Planet) -> RepoResult<()>;
    fn get_planet(&self, id: RecordId) -> RepoResult<Option<Planet>>;
    fn list_planets(&self, query: &ListQuery) -> RepoResult<Vec<Planet>>;
    /// Deletes the planet and its missions; returns the deleted mission ids.
    fn delete_planet(&self, id: RecordId) -> RepoResult<Vec<RecordId>>;
}

impl PlanetRepository for SqliteRepository<'_> {
    fn create_planet(&self, planet: &Planet) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO planets (name, distance_from_earth, nearest_star)
             VALUES (?1, ?2, ?3);",
            params![
                planet.name.as_deref(),
                planet.distance_from_earth,
                planet.nearest_star.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_planet(&self, planet: &Planet) -> RepoResult<()> {
        let id = planet.id().ok_or(RepoError::Unsaved("planet"))?;
        let changed = self.conn.execute(
            "UPDATE planets
             SET
                name = ?1,
                distance_from_earth = ?2,
                nearest_star = ?3
             WHERE id = ?4;",
            params![
                planet.name.as_deref(),
                planet.distance_from_earth,
                planet.nearest_star.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "planet",
                id,
            });
        }

        Ok(())
    }

    fn get_planet(&self, id: RecordId) -> RepoResult<Option<Planet>> {
        let planet = self
            .conn
            .query_row(
                &format!("{PLANET_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_planet_row,
            )
            .optional()?;
        Ok(planet)
    }

    fn list_planets(&self, query: &ListQuery) -> RepoResult<Vec<Planet>> {
        let sql = format!(
            "{PLANET_SELECT_SQL} ORDER BY id ASC{};",
            pagination_clause(query.limit, query.offset)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let planets = stmt
            .query_map([], parse_planet_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(planets)
    }

    fn delete_planet(&self, id: RecordId) -> RepoResult<Vec<RecordId>> {
        delete_cascading(self.conn, PLANET_OWNER, id)
    }
}

fn parse_planet_row(row: &Row<'_>) -> rusqlite::Result<Planet> {
    let planet = Planet {
        id: None,
        name: row.get("name")?,
        distance_from_earth: row.get("distance_from_earth")?,
        nearest_star: row.get("nearest_star")?,
    };
    Ok(planet.with_id(row.get("id")?))
}
