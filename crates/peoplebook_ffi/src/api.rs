//! FFI use-case API for the Flutter people list screen.
//!
//! # Responsibility
//! - Expose the list screen's intents (list/add/rename/delete) to Dart via FRB.
//! - Expose the family use-cases behind the same envelope style.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every people intent returns the controller snapshot after the intent;
//!   on failure that snapshot is the pre-intent one and `message` carries
//!   the notice.
//! - One connection per call; no state is kept between calls besides the
//!   resolved database path.

use log::warn;
use peoplebook_core::db::open_db;
use peoplebook_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, Family, FamilyService, PeopleController, PersonRow, SqliteRepository,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "peoplebook.sqlite3";
const DB_PATH_ENV: &str = "PEOPLEBOOK_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   blank picks the build default (`debug` or `info`).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        default_log_level()
    } else {
        level.as_str()
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One people list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonItem {
    /// Stable person ID in string form.
    pub person_id: String,
    /// Row title (name, or a placeholder when unnamed).
    pub title: String,
}

/// People list screen state returned by every people intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleScreenResponse {
    /// Whether the intent succeeded.
    pub ok: bool,
    /// Rows sorted by name; stale when `ok` is false.
    pub items: Vec<PersonItem>,
    /// Human-readable status or failure notice.
    pub message: String,
}

impl PeopleScreenResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// One family with its member ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyItem {
    pub family_id: String,
    pub name: String,
    pub person_ids: Vec<String>,
}

/// Envelope for family calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyResponse {
    pub ok: bool,
    pub items: Vec<FamilyItem>,
    pub message: String,
}

impl FamilyResponse {
    fn success(message: impl Into<String>, items: Vec<FamilyItem>) -> Self {
        Self {
            ok: true,
            items,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Loads the people list.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn people_list() -> PeopleScreenResponse {
    with_people_screen("people_list", |_| Ok("Loaded.".to_string()))
}

/// Adds a person with the given (optional) name, then returns the fresh list.
#[flutter_rust_bridge::frb(sync)]
pub fn people_add(name: Option<String>) -> PeopleScreenResponse {
    with_people_screen("people_add", |controller| {
        controller.add_person(name).map(|_| "Person added.".to_string())
    })
}

/// Renames a person, then returns the fresh list.
#[flutter_rust_bridge::frb(sync)]
pub fn people_rename(person_id: String, name: Option<String>) -> PeopleScreenResponse {
    let person_id = match parse_id(&person_id, "person_id") {
        Ok(id) => id,
        Err(message) => return PeopleScreenResponse::failure(message),
    };
    with_people_screen("people_rename", |controller| {
        controller
            .edit_person(person_id, name)
            .map(|()| "Person saved.".to_string())
    })
}

/// Deletes a person, then returns the fresh list.
#[flutter_rust_bridge::frb(sync)]
pub fn people_delete(person_id: String) -> PeopleScreenResponse {
    let person_id = match parse_id(&person_id, "person_id") {
        Ok(id) => id,
        Err(message) => return PeopleScreenResponse::failure(message),
    };
    with_people_screen("people_delete", |controller| {
        controller
            .delete_person(person_id)
            .map(|()| "Person deleted.".to_string())
    })
}

/// Lists all families.
#[flutter_rust_bridge::frb(sync)]
pub fn families_list() -> FamilyResponse {
    match with_family_service(|service| service.list_families().map_err(|err| err.to_string())) {
        Ok(families) => {
            let message = format!("Found {} family(ies).", families.len());
            FamilyResponse::success(message, families.into_iter().map(to_family_item).collect())
        }
        Err(err) => FamilyResponse::failure(format!("families_list failed: {err}")),
    }
}

/// Creates a family.
#[flutter_rust_bridge::frb(sync)]
pub fn family_create(name: String) -> FamilyResponse {
    match with_family_service(|service| service.create_family(name).map_err(|err| err.to_string()))
    {
        Ok(family) => FamilyResponse::success("Family created.", vec![to_family_item(family)]),
        Err(err) => FamilyResponse::failure(format!("family_create failed: {err}")),
    }
}

/// Moves a person into a family, replacing any previous family.
#[flutter_rust_bridge::frb(sync)]
pub fn family_attach(person_id: String, family_id: String) -> FamilyResponse {
    let ids = parse_id(&person_id, "person_id")
        .and_then(|person| parse_id(&family_id, "family_id").map(|family| (person, family)));
    let (person_id, family_id) = match ids {
        Ok(ids) => ids,
        Err(message) => return FamilyResponse::failure(message),
    };
    match with_family_service(|service| {
        service
            .attach(person_id, family_id)
            .map_err(|err| err.to_string())
    }) {
        Ok(family) => FamilyResponse::success("Person attached.", vec![to_family_item(family)]),
        Err(err) => FamilyResponse::failure(format!("family_attach failed: {err}")),
    }
}

fn with_people_screen(
    op: &'static str,
    intent: impl FnOnce(
        &mut PeopleController<SqliteRepository<'_>>,
    ) -> Result<String, peoplebook_core::ControllerError>,
) -> PeopleScreenResponse {
    let mut conn = match open_connection() {
        Ok(conn) => conn,
        Err(err) => return PeopleScreenResponse::failure(format!("{op} failed: {err}")),
    };
    let repo = match SqliteRepository::try_new(&mut conn) {
        Ok(repo) => repo,
        Err(err) => return PeopleScreenResponse::failure(format!("{op} failed: {err}")),
    };

    let mut controller = PeopleController::new(repo);
    if let Err(err) = controller.load() {
        return PeopleScreenResponse::failure(format!("{op} failed: {err}"));
    }

    let (ok, message) = match intent(&mut controller) {
        Ok(message) => (true, message),
        Err(err) => (
            false,
            controller
                .notice()
                .map_or_else(|| format!("{op} failed: {err}"), str::to_string),
        ),
    };
    PeopleScreenResponse {
        ok,
        items: controller.rows().into_iter().map(to_person_item).collect(),
        message,
    }
}

fn with_family_service<T>(
    f: impl FnOnce(&mut FamilyService<SqliteRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let mut conn = open_connection()?;
    let repo = SqliteRepository::try_new(&mut conn)
        .map_err(|err| format!("repository init failed: {err}"))?;
    let mut service = FamilyService::new(repo);
    f(&mut service)
}

fn open_connection() -> Result<Connection, String> {
    let path = resolve_db_path();
    open_db(&path).map_err(|err| {
        warn!(
            "event=ffi_db_open module=ffi status=error error_code=db_open_failed path={}",
            path.display()
        );
        format!("DB open failed: {err}")
    })
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field}: `{value}`"))
}

fn to_person_item(row: PersonRow) -> PersonItem {
    PersonItem {
        person_id: row.person_id.to_string(),
        title: row.title,
    }
}

fn to_family_item(family: Family) -> FamilyItem {
    FamilyItem {
        family_id: family.id.to_string(),
        name: family.name,
        person_ids: family.people.iter().map(Uuid::to_string).collect(),
    }
}
