//! Family entity.
//!
//! # Responsibility
//! - Define the grouping record people may be attached to.
//!
//! # Invariants
//! - `name` is never blank.
//! - `people` is derived from person links, never stored on its own, so a
//!   person cannot appear in two families.

use crate::model::person::PersonId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a family.
pub type FamilyId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyValidationError {
    BlankName,
}

impl Display for FamilyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "family name must not be blank"),
        }
    }
}

impl Error for FamilyValidationError {}

/// Family read model with its member ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    /// Members ordered like the people list (name ascending, then creation).
    pub people: Vec<PersonId>,
}

impl Family {
    /// Creates an empty, unsaved family with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            people: Vec::new(),
        }
    }

    pub fn contains(&self, person_id: PersonId) -> bool {
        self.people.contains(&person_id)
    }

    pub fn validate(&self) -> Result<(), FamilyValidationError> {
        if self.name.trim().is_empty() {
            return Err(FamilyValidationError::BlankName);
        }
        Ok(())
    }
}
