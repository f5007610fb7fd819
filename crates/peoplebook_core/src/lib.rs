//! Core domain logic for Peoplebook.
//! This crate owns the people/family store and the list screen's behavior.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::family::{Family, FamilyId, FamilyValidationError};
pub use model::person::{
    Person, PersonId, PersonValidationError, DEFAULT_PERSON_AGE, DEFAULT_PERSON_GENDER,
    UNNAMED_DISPLAY_NAME,
};
pub use repo::error::{RepoError, RepoResult};
pub use repo::family_repo::FamilyRepository;
pub use repo::person_repo::PersonRepository;
pub use repo::SqliteRepository;
pub use service::family_service::{FamilyService, FamilyServiceError};
pub use service::people_controller::{ControllerError, PeopleController, PersonRow};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
