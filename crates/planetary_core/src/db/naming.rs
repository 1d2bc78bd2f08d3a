//! Deterministic constraint naming.
//!
//! # Responsibility
//! - Render index/unique/check/foreign-key/primary-key names from templates.
//!
//! # Invariants
//! - The same table/column inputs always render the same name.
//! - A template token that the constraint kind cannot supply is an error,
//!   never an empty substitution.

use crate::db::{DbError, DbResult};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TEMPLATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\(([a-z0-9_]+)\)s").expect("valid template token regex"));

/// Constraint category, each with its own template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Index,
    Unique,
    Check,
    ForeignKey,
    PrimaryKey,
}

/// Inputs available to a naming template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintTarget<'a> {
    pub table_name: &'a str,
    pub column_0_name: Option<&'a str>,
    pub referred_table_name: Option<&'a str>,
    pub constraint_name: Option<&'a str>,
}

/// Template set keyed by constraint kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    pub index: String,
    pub unique: String,
    pub check: String,
    pub foreign_key: String,
    pub primary_key: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            index: "ix_%(column_0_label)s".to_string(),
            unique: "uq_%(table_name)s_%(column_0_name)s".to_string(),
            check: "ck_%(table_name)s_%(constraint_name)s".to_string(),
            foreign_key: "fk_%(table_name)s_%(column_0_name)s_%(referred_table_name)s"
                .to_string(),
            primary_key: "pk_%(table_name)s".to_string(),
        }
    }
}

impl NamingConvention {
    fn template(&self, kind: ConstraintKind) -> &str {
        match kind {
            ConstraintKind::Index => &self.index,
            ConstraintKind::Unique => &self.unique,
            ConstraintKind::Check => &self.check,
            ConstraintKind::ForeignKey => &self.foreign_key,
            ConstraintKind::PrimaryKey => &self.primary_key,
        }
    }

    /// Renders the constraint name for `target`.
    ///
    /// # Errors
    /// - `DbError::Naming` when the template uses an unknown token or one the
    ///   target does not provide.
    pub fn render(&self, kind: ConstraintKind, target: &ConstraintTarget<'_>) -> DbResult<String> {
        let template = self.template(kind);
        let mut missing: Option<String> = None;

        let rendered = TEMPLATE_TOKEN_RE.replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[1];
            match resolve_token(token, target) {
                Some(value) => value,
                None => {
                    missing.get_or_insert_with(|| token.to_string());
                    String::new()
                }
            }
        });

        if let Some(token) = missing {
            return Err(DbError::Naming {
                template: template.to_string(),
                token,
            });
        }

        Ok(rendered.into_owned())
    }
}

fn resolve_token(token: &str, target: &ConstraintTarget<'_>) -> Option<String> {
    match token {
        "table_name" => Some(target.table_name.to_string()),
        "column_0_name" => target.column_0_name.map(str::to_string),
        "column_0_label" => target
            .column_0_name
            .map(|column| format!("{}_{}", target.table_name, column)),
        "referred_table_name" => target.referred_table_name.map(str::to_string),
        "constraint_name" => target.constraint_name.map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstraintKind, ConstraintTarget, NamingConvention};
    use crate::db::DbError;

    #[test]
    fn default_convention_renders_all_kinds() {
        let convention = NamingConvention::default();
        let fk = ConstraintTarget {
            table_name: "missions",
            column_0_name: Some("planet_id"),
            referred_table_name: Some("planets"),
            constraint_name: None,
        };

        assert_eq!(
            convention.render(ConstraintKind::ForeignKey, &fk).unwrap(),
            "fk_missions_planet_id_planets"
        );
        assert_eq!(
            convention.render(ConstraintKind::Index, &fk).unwrap(),
            "ix_missions_planet_id"
        );
        assert_eq!(
            convention.render(ConstraintKind::Unique, &fk).unwrap(),
            "uq_missions_planet_id"
        );
        assert_eq!(
            convention
                .render(
                    ConstraintKind::PrimaryKey,
                    &ConstraintTarget {
                        table_name: "planets",
                        ..ConstraintTarget::default()
                    }
                )
                .unwrap(),
            "pk_planets"
        );
        assert_eq!(
            convention
                .render(
                    ConstraintKind::Check,
                    &ConstraintTarget {
                        table_name: "scientists",
                        constraint_name: Some("name_not_empty"),
                        ..ConstraintTarget::default()
                    }
                )
                .unwrap(),
            "ck_scientists_name_not_empty"
        );
    }

    #[test]
    fn missing_token_is_an_error() {
        let convention = NamingConvention::default();
        let err = convention
            .render(
                ConstraintKind::ForeignKey,
                &ConstraintTarget {
                    table_name: "missions",
                    column_0_name: Some("planet_id"),
                    ..ConstraintTarget::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, DbError::Naming { token, .. } if token == "referred_table_name"));
    }

    #[test]
    fn unknown_token_is_an_error() {
        let convention = NamingConvention {
            primary_key: "pk_%(schema)s".to_string(),
            ..NamingConvention::default()
        };
        let err = convention
            .render(
                ConstraintKind::PrimaryKey,
                &ConstraintTarget {
                    table_name: "planets",
                    ..ConstraintTarget::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, DbError::Naming { token, .. } if token == "schema"));
    }
}
