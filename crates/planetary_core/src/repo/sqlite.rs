//! SQLite repository handle and shared persistence helpers.
//!
//! # Responsibility
//! - Verify a connection is migrated before any record access.
//! - Provide the transactional cascade delete used by planets and scientists.
//!
//! # Invariants
//! - A `SqliteRepository` only exists for connections at the latest schema
//!   version with every declared table and column present.
//! - Cascade deletes run in one immediate transaction: children and parent
//!   are removed together or not at all.

use crate::db::migrations::latest_version;
use crate::db::schema::{TableDef, MISSIONS, TABLES};
use crate::model::validation::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use log::debug;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// SQLite-backed repository for planets, scientists and missions.
pub struct SqliteRepository<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteRepository<'conn> {
    /// Creates a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema drifted.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

/// Parent side of a one-to-many mission relationship.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OwningTable {
    pub entity: &'static str,
    pub table: &'static str,
    /// Column in `missions` that references this table.
    pub mission_fk: &'static str,
}

pub(crate) const PLANET_OWNER: OwningTable = OwningTable {
    entity: "planet",
    table: "planets",
    mission_fk: "planet_id",
};

pub(crate) const SCIENTIST_OWNER: OwningTable = OwningTable {
    entity: "scientist",
    table: "scientists",
    mission_fk: "scientist_id",
};

/// Deletes one parent row and every mission that references it.
///
/// Returns the ids of the deleted missions in ascending order.
pub(crate) fn delete_cascading(
    conn: &Connection,
    owner: OwningTable,
    id: RecordId,
) -> RepoResult<Vec<RecordId>> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    if !row_exists(&tx, owner.table, id)? {
        return Err(RepoError::NotFound {
            entity: owner.entity,
            id,
        });
    }

    let mission_ids = {
        let mut stmt = tx.prepare(&format!(
            "SELECT id FROM {} WHERE {} = ?1 ORDER BY id ASC;",
            MISSIONS.name, owner.mission_fk
        ))?;
        let ids = stmt
            .query_map([id], |row| row.get::<_, RecordId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids
    };

    tx.execute(
        &format!(
            "DELETE FROM {} WHERE {} = ?1;",
            MISSIONS.name, owner.mission_fk
        ),
        [id],
    )?;
    tx.execute(&format!("DELETE FROM {} WHERE id = ?1;", owner.table), [id])?;
    tx.commit()?;

    debug!(
        "event=cascade_delete module=repo status=ok entity={} id={} missions_deleted={}",
        owner.entity,
        id,
        mission_ids.len()
    );
    Ok(mission_ids)
}

pub(crate) fn row_exists(conn: &Connection, table: &str, id: RecordId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Converts the `LIMIT`/`OFFSET` pair into SQL, SQLite style.
pub(crate) fn pagination_clause(limit: Option<u32>, offset: u32) -> String {
    match (limit, offset) {
        (Some(limit), 0) => format!(" LIMIT {limit}"),
        (Some(limit), offset) => format!(" LIMIT {limit} OFFSET {offset}"),
        (None, 0) => String::new(),
        (None, offset) => format!(" LIMIT -1 OFFSET {offset}"),
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in TABLES {
        ensure_table_ready(conn, table)?;
    }

    Ok(())
}

fn ensure_table_ready(conn: &Connection, table: &TableDef) -> RepoResult<()> {
    if !table_exists(conn, table.name)? {
        return Err(RepoError::MissingRequiredTable(table.name));
    }

    for column in table.column_names() {
        if !table_has_column(conn, table.name, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: table.name,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
