//! Scientist repository contract and SQLite implementation.
//!
//! # Invariants
//! - Read paths reject rows whose required text is empty instead of masking it.
//! - Deleting a scientist deletes their missions in the same transaction.

use crate::model::scientist::Scientist;
use crate::model::validation::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sqlite::{
    delete_cascading, pagination_clause, SqliteRepository, SCIENTIST_OWNER,
};
use crate::repo::ListQuery;
use rusqlite::{params, Row};

const SCIENTIST_SELECT_SQL: &str = "SELECT
    id,
    name,
    field_of_study
FROM scientists";

/// Repository interface for scientist CRUD.
pub trait ScientistRepository {
    fn create_scientist(&self, scientist: &Scientist) -> RepoResult<RecordId>;
    fn update_scientist(&self, scientist: &Scientist) -> RepoResult<()>;
    fn get_scientist(&self, id: RecordId) -> RepoResult<Option<Scientist>>;
    fn list_scientists(&self, query: &ListQuery) -> RepoResult<Vec<Scientist>>;
    /// Deletes the scientist and their missions; returns the deleted mission ids.
    fn delete_scientist(&self, id: RecordId) -> RepoResult<Vec<RecordId>>;
}

impl ScientistRepository for SqliteRepository<'_> {
    fn create_scientist(&self, scientist: &Scientist) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO scientists (name, field_of_study) VALUES (?1, ?2);",
            params![scientist.name(), scientist.field_of_study()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_scientist(&self, scientist: &Scientist) -> RepoResult<()> {
        let id = scientist.id().ok_or(RepoError::Unsaved("scientist"))?;
        let changed = self.conn.execute(
            "UPDATE scientists
             SET
                name = ?1,
                field_of_study = ?2
             WHERE id = ?3;",
            params![scientist.name(), scientist.field_of_study(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "scientist",
                id,
            });
        }

        Ok(())
    }

    fn get_scientist(&self, id: RecordId) -> RepoResult<Option<Scientist>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SCIENTIST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_scientist_row(row)?));
        }
        Ok(None)
    }

    fn list_scientists(&self, query: &ListQuery) -> RepoResult<Vec<Scientist>> {
        let sql = format!(
            "{SCIENTIST_SELECT_SQL} ORDER BY id ASC{};",
            pagination_clause(query.limit, query.offset)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut scientists = Vec::new();
        while let Some(row) = rows.next()? {
            scientists.push(parse_scientist_row(row)?);
        }
        Ok(scientists)
    }

    fn delete_scientist(&self, id: RecordId) -> RepoResult<Vec<RecordId>> {
        delete_cascading(self.conn, SCIENTIST_OWNER, id)
    }
}

fn parse_scientist_row(row: &Row<'_>) -> RepoResult<Scientist> {
    let id: RecordId = row.get("id")?;
    let name: Option<String> = row.get("name")?;
    let field_of_study: Option<String> = row.get("field_of_study")?;
    let scientist = Scientist::new(name, field_of_study).map_err(|err| {
        RepoError::InvalidData(format!("scientists row {id}: {err}"))
    })?;
    Ok(scientist.with_id(id))
}
