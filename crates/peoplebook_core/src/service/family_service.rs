//! Family use-case service.
//!
//! # Responsibility
//! - Normalize family input before it reaches the repository.
//! - Read families back after mutations so callers get the stored shape.
//! - Seed the relationship demo used by the CLI probe.
//!
//! # Invariants
//! - Family names are trimmed and never blank.
//! - Deleting a family detaches its people; it never deletes them.

use crate::model::family::{Family, FamilyId};
use crate::model::person::PersonId;
use crate::repo::error::RepoError;
use crate::repo::family_repo::FamilyRepository;
use crate::repo::person_repo::PersonRepository;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEMO_FAMILY_NAME: &str = "ABC family";
pub const DEMO_PERSON_NAME: &str = "Maggie";

#[derive(Debug)]
pub enum FamilyServiceError {
    /// Family name is blank after trim.
    InvalidName,
    PersonNotFound(PersonId),
    FamilyNotFound(FamilyId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but the read-back did not match.
    InconsistentState(&'static str),
}

impl Display for FamilyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "family name must not be blank"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::FamilyNotFound(id) => write!(f, "family not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent family state: {details}"),
        }
    }
}

impl Error for FamilyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FamilyServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::PersonNotFound(id) => Self::PersonNotFound(id),
            RepoError::FamilyNotFound(id) => Self::FamilyNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Family service facade over a repository that also stores people.
pub struct FamilyService<R: PersonRepository + FamilyRepository> {
    repo: R,
}

impl<R: PersonRepository + FamilyRepository> FamilyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an empty family from a trimmed, non-blank name.
    pub fn create_family(
        &mut self,
        name: impl Into<String>,
    ) -> Result<Family, FamilyServiceError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FamilyServiceError::InvalidName);
        }
        let family = self.repo.create_family(trimmed)?;
        info!(
            "event=family_create module=family_service status=ok family_id={}",
            family.id
        );
        Ok(family)
    }

    pub fn get_family(&self, id: FamilyId) -> Result<Option<Family>, FamilyServiceError> {
        Ok(self.repo.get_family(id)?)
    }

    /// All families ordered by name, members in list order.
    pub fn list_families(&self) -> Result<Vec<Family>, FamilyServiceError> {
        Ok(self.repo.list_families()?)
    }

    /// Moves a person into a family and returns the family as stored.
    pub fn attach(
        &mut self,
        person_id: PersonId,
        family_id: FamilyId,
    ) -> Result<Family, FamilyServiceError> {
        self.repo.attach_person_to_family(person_id, family_id)?;
        info!(
            "event=family_attach module=family_service status=ok person_id={person_id} family_id={family_id}"
        );
        let family = self
            .get_family(family_id)?
            .ok_or(FamilyServiceError::InconsistentState(
                "family missing after attach",
            ))?;
        if !family.contains(person_id) {
            return Err(FamilyServiceError::InconsistentState(
                "attached person missing from family",
            ));
        }
        Ok(family)
    }

    pub fn detach(&mut self, person_id: PersonId) -> Result<(), FamilyServiceError> {
        self.repo.detach_person(person_id)?;
        info!("event=family_detach module=family_service status=ok person_id={person_id}");
        Ok(())
    }

    /// Deletes a family; its people stay, unlinked.
    pub fn delete_family(&mut self, id: FamilyId) -> Result<(), FamilyServiceError> {
        self.repo.delete_family(id)?;
        info!("event=family_delete module=family_service status=ok family_id={id}");
        Ok(())
    }

    /// Creates "ABC family" with "Maggie" in it.
    pub fn seed_relationship_demo(&mut self) -> Result<Family, FamilyServiceError> {
        let family = self.create_family(DEMO_FAMILY_NAME)?;
        let person = self.repo.create_person(Some(DEMO_PERSON_NAME))?;
        self.attach(person.id, family.id)
    }

    /// Read access for callers that render people next to families.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}
