//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::naming::NamingConvention;
use crate::db::schema::render_schema;
use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: fn() -> DbResult<String>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init_planets_scientists_missions",
    sql: initial_schema_sql,
}];

fn initial_schema_sql() -> DbResult<String> {
    render_schema(&NamingConvention::default())
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        let sql = (migration.sql)()?;
        tx.execute_batch(&sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=migration_applied module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, MIGRATIONS};

    #[test]
    fn migration_versions_are_strictly_increasing() {
        let versions: Vec<u32> = MIGRATIONS.iter().map(|migration| migration.version).collect();
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(latest_version(), *versions.last().unwrap());
    }

    #[test]
    fn migration_sql_renders() {
        for migration in MIGRATIONS {
            let sql = (migration.sql)().unwrap();
            assert!(sql.contains("CREATE TABLE"), "{} rendered no DDL", migration.name);
        }
    }
}
