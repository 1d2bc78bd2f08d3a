//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Resolve relationships (planet/scientist ↔ missions) by explicit query.
//!
//! # Invariants
//! - Records reach storage only after passing model validation.
//! - Repository APIs return semantic errors (`NotFound`, `Integrity`) in
//!   addition to DB transport errors.

pub mod error;
pub mod mission_repo;
pub mod planet_repo;
pub mod relation;
pub mod scientist_repo;
pub mod sqlite;

/// Pagination options shared by list operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}
