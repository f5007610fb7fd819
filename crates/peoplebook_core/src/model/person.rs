//! Person entity.
//!
//! # Responsibility
//! - Define the canonical person record shown by the people list.
//! - Provide the add-flow defaults (`age = 20`, `gender = "Male"`).
//!
//! # Invariants
//! - `id` is stable and never reused for another person.
//! - `age` is never negative and `gender` is never blank.
//! - `family_id` holds the single family link, if any.

use crate::model::family::FamilyId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a person.
pub type PersonId = Uuid;

/// Age assigned to people created through the add flow.
pub const DEFAULT_PERSON_AGE: i32 = 20;
/// Gender assigned to people created through the add flow.
pub const DEFAULT_PERSON_GENDER: &str = "Male";
/// Row label used when a person has no usable name.
pub const UNNAMED_DISPLAY_NAME: &str = "Unnamed";

/// Field-level validation failures for [`Person`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    NegativeAge(i32),
    BlankGender,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAge(age) => write!(f, "person age must not be negative, got {age}"),
            Self::BlankGender => write!(f, "person gender must not be blank"),
        }
    }
}

impl Error for PersonValidationError {}

/// Canonical person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable id assigned at creation.
    pub id: PersonId,
    /// Free text; absent and empty are both allowed.
    pub name: Option<String>,
    pub age: i32,
    pub gender: String,
    /// Owning family, if linked.
    pub family_id: Option<FamilyId>,
}

impl Person {
    /// Creates an unsaved person with a fresh id and add-flow defaults.
    pub fn new(name: Option<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an unsaved person with a caller-provided id and add-flow defaults.
    pub fn with_id(id: PersonId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            age: DEFAULT_PERSON_AGE,
            gender: DEFAULT_PERSON_GENDER.to_string(),
            family_id: None,
        }
    }

    /// Label shown by a list row.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_DISPLAY_NAME,
        }
    }

    /// Returns whether this person is linked to `family_id`.
    pub fn belongs_to(&self, family_id: FamilyId) -> bool {
        self.family_id == Some(family_id)
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.age < 0 {
            return Err(PersonValidationError::NegativeAge(self.age));
        }
        if self.gender.trim().is_empty() {
            return Err(PersonValidationError::BlankGender);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Person, PersonValidationError, DEFAULT_PERSON_AGE, UNNAMED_DISPLAY_NAME};

    #[test]
    fn new_person_uses_add_flow_defaults() {
        let person = Person::new(Some("Alice".to_string()));
        assert_eq!(person.age, DEFAULT_PERSON_AGE);
        assert_eq!(person.gender, "Male");
        assert!(person.family_id.is_none());
        assert!(person.validate().is_ok());
    }

    #[test]
    fn display_name_falls_back_for_absent_or_blank_names() {
        assert_eq!(Person::new(None).display_name(), UNNAMED_DISPLAY_NAME);
        assert_eq!(
            Person::new(Some("   ".to_string())).display_name(),
            UNNAMED_DISPLAY_NAME
        );
        assert_eq!(Person::new(Some(" Bob ".to_string())).display_name(), "Bob");
    }

    #[test]
    fn validate_rejects_negative_age_and_blank_gender() {
        let mut person = Person::new(None);
        person.age = -1;
        assert_eq!(
            person.validate(),
            Err(PersonValidationError::NegativeAge(-1))
        );

        person.age = 30;
        person.gender = " ".to_string();
        assert_eq!(person.validate(), Err(PersonValidationError::BlankGender));
    }
}
