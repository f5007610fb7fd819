//! People list controller.
//!
//! # Responsibility
//! - Turn add/edit/delete intents into repository calls.
//! - Hold the snapshot a list view renders, plus the last failure notice.
//!
//! # Invariants
//! - The snapshot is only ever replaced wholesale by `list_people` output.
//! - A successful mutation is always followed by a full re-fetch.
//! - A failed mutation leaves the snapshot untouched, sets `notice`, and
//!   returns the error to the caller.

use crate::model::person::{Person, PersonId};
use crate::repo::error::RepoError;
use crate::repo::person_repo::PersonRepository;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ControllerError {
    /// Repository-level failure.
    Repo(RepoError),
    /// Selected row index is not in the current snapshot.
    RowOutOfRange { row: usize, row_count: usize },
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::RowOutOfRange { row, row_count } => {
                write!(f, "row {row} is out of range for {row_count} row(s)")
            }
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::RowOutOfRange { .. } => None,
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    pub person_id: PersonId,
    pub title: String,
}

#[derive(Debug, Clone, Copy)]
enum Intent {
    Refresh,
    Add,
    Edit,
    Delete,
}

impl Intent {
    fn event(self) -> &'static str {
        match self {
            Self::Refresh => "people_refresh",
            Self::Add => "person_create",
            Self::Edit => "person_rename",
            Self::Delete => "person_delete",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Refresh => "Loading people",
            Self::Add => "Adding person",
            Self::Edit => "Saving person",
            Self::Delete => "Deleting person",
        }
    }
}

/// Controller for the single people list screen.
///
/// The repository is injected; the controller never reaches for shared
/// storage on its own.
pub struct PeopleController<R: PersonRepository> {
    repo: R,
    snapshot: Vec<Person>,
    notice: Option<String>,
}

impl<R: PersonRepository> PeopleController<R> {
    /// Creates a controller with an empty snapshot. Call `load` before rendering.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            snapshot: Vec::new(),
            notice: None,
        }
    }

    /// Initial fetch; same contract as [`refresh`](Self::refresh).
    pub fn load(&mut self) -> Result<&[Person], ControllerError> {
        self.refresh()
    }

    /// Replaces the snapshot with the store's current sorted contents.
    pub fn refresh(&mut self) -> Result<&[Person], ControllerError> {
        match self.repo.list_people() {
            Ok(people) => {
                debug!(
                    "event={} module=controller status=ok row_count={}",
                    Intent::Refresh.event(),
                    people.len()
                );
                self.snapshot = people;
                Ok(self.snapshot.as_slice())
            }
            Err(err) => Err(self.fail(Intent::Refresh, None, err)),
        }
    }

    /// Add intent: persists a new person, then re-fetches.
    pub fn add_person(&mut self, name: Option<String>) -> Result<Person, ControllerError> {
        match self.repo.create_person(name.as_deref()) {
            Ok(person) => {
                self.succeed(Intent::Add, person.id);
                self.refresh()?;
                Ok(person)
            }
            Err(err) => Err(self.fail(Intent::Add, None, err)),
        }
    }

    /// Edit intent: replaces the person's name, then re-fetches.
    pub fn edit_person(
        &mut self,
        person_id: PersonId,
        name: Option<String>,
    ) -> Result<(), ControllerError> {
        match self.repo.update_person_name(person_id, name.as_deref()) {
            Ok(()) => {
                self.succeed(Intent::Edit, person_id);
                self.refresh()?;
                Ok(())
            }
            Err(err) => Err(self.fail(Intent::Edit, Some(person_id), err)),
        }
    }

    /// Delete intent: removes the person, then re-fetches.
    pub fn delete_person(&mut self, person_id: PersonId) -> Result<(), ControllerError> {
        match self.repo.delete_person(person_id) {
            Ok(()) => {
                self.succeed(Intent::Delete, person_id);
                self.refresh()?;
                Ok(())
            }
            Err(err) => Err(self.fail(Intent::Delete, Some(person_id), err)),
        }
    }

    /// Row-selection edit: renames the person shown at `row`.
    pub fn edit_row(&mut self, row: usize, name: Option<String>) -> Result<(), ControllerError> {
        let person_id = self.person_id_at(row)?;
        self.edit_person(person_id, name)
    }

    /// Swipe-to-delete: removes the person shown at `row`.
    pub fn delete_row(&mut self, row: usize) -> Result<(), ControllerError> {
        let person_id = self.person_id_at(row)?;
        self.delete_person(person_id)
    }

    /// Current snapshot, in list order.
    pub fn people(&self) -> &[Person] {
        &self.snapshot
    }

    pub fn row_count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn row(&self, index: usize) -> Option<PersonRow> {
        self.snapshot.get(index).map(to_row)
    }

    pub fn rows(&self) -> Vec<PersonRow> {
        self.snapshot.iter().map(to_row).collect()
    }

    /// Last failure message for the user, if not dismissed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn person_id_at(&self, row: usize) -> Result<PersonId, ControllerError> {
        self.snapshot
            .get(row)
            .map(|person| person.id)
            .ok_or(ControllerError::RowOutOfRange {
                row,
                row_count: self.snapshot.len(),
            })
    }

    fn succeed(&mut self, intent: Intent, person_id: PersonId) {
        self.notice = None;
        info!(
            "event={} module=controller status=ok person_id={person_id}",
            intent.event()
        );
    }

    fn fail(
        &mut self,
        intent: Intent,
        person_id: Option<PersonId>,
        err: RepoError,
    ) -> ControllerError {
        let person_id = person_id.map_or_else(|| "none".to_string(), |id| id.to_string());
        warn!(
            "event={} module=controller status=error person_id={person_id} error={err}",
            intent.event()
        );
        self.notice = Some(format!("{} failed: {err}", intent.label()));
        ControllerError::Repo(err)
    }
}

fn to_row(person: &Person) -> PersonRow {
    PersonRow {
        person_id: person.id,
        title: person.display_name().to_string(),
    }
}
