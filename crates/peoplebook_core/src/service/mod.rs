//! Use-case layer above the repositories.
//!
//! # Responsibility
//! - Drive the people list screen (`PeopleController`).
//! - Provide family use-cases (`FamilyService`).
//! - Keep FFI/CLI callers decoupled from storage details.

pub mod family_service;
pub mod people_controller;
