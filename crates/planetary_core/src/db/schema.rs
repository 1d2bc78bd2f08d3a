//! Static table definitions and DDL rendering.
//!
//! # Responsibility
//! - Declare the `planets`, `scientists` and `missions` tables as data.
//! - Render `CREATE TABLE` / `CREATE INDEX` statements with conventional
//!   constraint names.
//!
//! # Invariants
//! - Tables are listed parents first so foreign keys always resolve.
//! - Every foreign key cascades deletes from the referred row.

use crate::db::naming::{ConstraintKind, ConstraintTarget, NamingConvention};
use crate::db::DbResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub not_null: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDef {
    pub column: &'static str,
    pub referred_table: &'static str,
    pub referred_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckDef {
    /// Short name fed to the `constraint_name` template token.
    pub name: &'static str,
    pub expression: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
    pub checks: &'static [CheckDef],
    /// Single-column indexes, one per listed column.
    pub indexes: &'static [&'static str],
}

impl TableDef {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }
}

const fn column(name: &'static str, sql_type: &'static str, not_null: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        not_null,
    }
}

pub static PLANETS: TableDef = TableDef {
    name: "planets",
    primary_key: "id",
    columns: &[
        column("id", "INTEGER", true),
        column("name", "TEXT", false),
        column("distance_from_earth", "INTEGER", false),
        column("nearest_star", "TEXT", false),
    ],
    foreign_keys: &[],
    checks: &[],
    indexes: &[],
};

pub static SCIENTISTS: TableDef = TableDef {
    name: "scientists",
    primary_key: "id",
    columns: &[
        column("id", "INTEGER", true),
        column("name", "TEXT", true),
        column("field_of_study", "TEXT", true),
    ],
    foreign_keys: &[],
    checks: &[
        CheckDef {
            name: "name_not_empty",
            expression: "length(name) > 0",
        },
        CheckDef {
            name: "field_of_study_not_empty",
            expression: "length(field_of_study) > 0",
        },
    ],
    indexes: &[],
};

pub static MISSIONS: TableDef = TableDef {
    name: "missions",
    primary_key: "id",
    columns: &[
        column("id", "INTEGER", true),
        column("name", "TEXT", true),
        column("planet_id", "INTEGER", true),
        column("scientist_id", "INTEGER", true),
    ],
    foreign_keys: &[
        ForeignKeyDef {
            column: "planet_id",
            referred_table: "planets",
            referred_column: "id",
        },
        ForeignKeyDef {
            column: "scientist_id",
            referred_table: "scientists",
            referred_column: "id",
        },
    ],
    checks: &[CheckDef {
        name: "name_not_empty",
        expression: "length(name) > 0",
    }],
    indexes: &["planet_id", "scientist_id"],
};

/// All tables, parents before children.
pub static TABLES: &[&TableDef] = &[&PLANETS, &SCIENTISTS, &MISSIONS];

/// Renders `CREATE TABLE` plus its `CREATE INDEX` statements.
pub fn render_table(table: &TableDef, convention: &NamingConvention) -> DbResult<String> {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            if column.not_null {
                format!("    {} {} NOT NULL", column.name, column.sql_type)
            } else {
                format!("    {} {}", column.name, column.sql_type)
            }
        })
        .collect();

    let pk_name = convention.render(
        ConstraintKind::PrimaryKey,
        &ConstraintTarget {
            table_name: table.name,
            column_0_name: Some(table.primary_key),
            ..ConstraintTarget::default()
        },
    )?;
    lines.push(format!(
        "    CONSTRAINT {pk_name} PRIMARY KEY ({})",
        table.primary_key
    ));

    for check in table.checks {
        let ck_name = convention.render(
            ConstraintKind::Check,
            &ConstraintTarget {
                table_name: table.name,
                constraint_name: Some(check.name),
                ..ConstraintTarget::default()
            },
        )?;
        lines.push(format!("    CONSTRAINT {ck_name} CHECK ({})", check.expression));
    }

    for fk in table.foreign_keys {
        let fk_name = convention.render(
            ConstraintKind::ForeignKey,
            &ConstraintTarget {
                table_name: table.name,
                column_0_name: Some(fk.column),
                referred_table_name: Some(fk.referred_table),
                constraint_name: None,
            },
        )?;
        lines.push(format!(
            "    CONSTRAINT {fk_name} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
            fk.column, fk.referred_table, fk.referred_column
        ));
    }

    let mut sql = format!("CREATE TABLE {} (\n{}\n);\n", table.name, lines.join(",\n"));

    for index_column in table.indexes {
        let ix_name = convention.render(
            ConstraintKind::Index,
            &ConstraintTarget {
                table_name: table.name,
                column_0_name: Some(*index_column),
                ..ConstraintTarget::default()
            },
        )?;
        sql.push_str(&format!(
            "CREATE INDEX {ix_name} ON {} ({index_column});\n",
            table.name
        ));
    }

    Ok(sql)
}

/// Renders DDL for every table in dependency order.
pub fn render_schema(convention: &NamingConvention) -> DbResult<String> {
    let mut sql = String::new();
    for table in TABLES {
        sql.push_str(&render_table(table, convention)?);
    }
    Ok(sql)
}
