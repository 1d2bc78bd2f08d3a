//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into API-facing use-cases.
//! - Keep the API layer decoupled from storage details.

pub mod record_service;
