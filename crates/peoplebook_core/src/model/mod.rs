//! Domain model for the people list and its family grouping.
//!
//! # Responsibility
//! - Define the entities persisted by the repository layer.
//! - Own creation defaults and field-level validation rules.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID assigned at creation.
//! - A person links to at most one family; the family side is derived.

pub mod family;
pub mod person;
