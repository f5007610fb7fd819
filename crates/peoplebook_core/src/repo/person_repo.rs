//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/rename/delete over the `people` table.
//! - Keep the list order inside the persistence boundary.
//!
//! # Invariants
//! - `list_people` orders by `name ASC, seq ASC` with binary collation;
//!   absent names sort first and ties keep creation order.
//! - A failed write leaves no visible change.
//! - Deleting a person removes it from its family in the same commit, since
//!   membership is the person's own `family_uuid` column.

use crate::model::person::{Person, PersonId};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::sqlite::{parse_uuid, SqliteRepository};
use rusqlite::{params, Connection, Row};

const PERSON_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    age,
    gender,
    family_uuid
FROM people";

/// Repository interface for person CRUD.
pub trait PersonRepository {
    /// Returns every stored person, sorted by name ascending.
    fn list_people(&self) -> RepoResult<Vec<Person>>;
    /// Loads one person by id.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Creates and persists a person with add-flow defaults.
    fn create_person(&mut self, name: Option<&str>) -> RepoResult<Person>;
    /// Replaces the name of an existing person.
    fn update_person_name(&mut self, id: PersonId, name: Option<&str>) -> RepoResult<()>;
    /// Removes an existing person.
    fn delete_person(&mut self, id: PersonId) -> RepoResult<()>;
}

impl PersonRepository for SqliteRepository<'_> {
    fn list_people(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY name ASC, seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut people = Vec::new();
        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }
        Ok(people)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_person_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_person(&mut self, name: Option<&str>) -> RepoResult<Person> {
        let person = Person::new(name.map(str::to_string));
        person.validate()?;

        self.write(|tx| {
            tx.execute(
                "INSERT INTO people (uuid, name, age, gender) VALUES (?1, ?2, ?3, ?4);",
                params![
                    person.id.to_string(),
                    person.name.as_deref(),
                    person.age,
                    person.gender.as_str(),
                ],
            )
            .map_err(RepoError::write)?;
            Ok(())
        })?;

        Ok(person)
    }

    fn update_person_name(&mut self, id: PersonId, name: Option<&str>) -> RepoResult<()> {
        self.write(|tx| {
            let changed = tx
                .execute(
                    "UPDATE people
                     SET
                        name = ?2,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE uuid = ?1;",
                    params![id.to_string(), name],
                )
                .map_err(RepoError::write)?;
            if changed == 0 {
                return Err(RepoError::PersonNotFound(id));
            }
            Ok(())
        })
    }

    fn delete_person(&mut self, id: PersonId) -> RepoResult<()> {
        self.write(|tx| {
            let changed = tx
                .execute("DELETE FROM people WHERE uuid = ?1;", [id.to_string()])
                .map_err(RepoError::write)?;
            if changed == 0 {
                return Err(RepoError::PersonNotFound(id));
            }
            Ok(())
        })
    }
}

/// Lists the ids of people linked to one family, in list order.
pub(crate) fn family_member_ids(
    conn: &Connection,
    family_uuid: &str,
) -> RepoResult<Vec<PersonId>> {
    let mut stmt = conn.prepare(
        "SELECT uuid
         FROM people
         WHERE family_uuid = ?1
         ORDER BY name ASC, seq ASC;",
    )?;
    let mut rows = stmt.query([family_uuid])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get(0)?;
        ids.push(parse_uuid(&uuid_text, "people.uuid")?);
    }
    Ok(ids)
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "people.uuid")?;
    let family_id = row
        .get::<_, Option<String>>("family_uuid")?
        .map(|value| parse_uuid(&value, "people.family_uuid"))
        .transpose()?;

    let person = Person {
        id,
        name: row.get("name")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        family_id,
    };
    person.validate()?;
    Ok(person)
}
