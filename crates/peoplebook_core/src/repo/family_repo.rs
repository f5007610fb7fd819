//! Family repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist families and the single person -> family link.
//! - Own the detach-on-delete policy for families.
//!
//! # Invariants
//! - Attaching overwrites the person's previous link in one statement, so
//!   a person is never a member of two families.
//! - Deleting a family keeps its people and clears their link
//!   (cascade-detach) in the same transaction.
//! - Family lists order by `name ASC, seq ASC`.

use crate::model::family::{Family, FamilyId};
use crate::model::person::PersonId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::person_repo::family_member_ids;
use crate::repo::sqlite::{parse_uuid, row_exists, SqliteRepository};
use rusqlite::{params, Connection, Row};

const FAMILY_SELECT_SQL: &str = "SELECT uuid, name FROM families";

/// Repository interface for families and person membership.
pub trait FamilyRepository {
    /// Creates and persists an empty family.
    fn create_family(&mut self, name: &str) -> RepoResult<Family>;
    /// Loads one family with its member ids.
    fn get_family(&self, id: FamilyId) -> RepoResult<Option<Family>>;
    /// Returns every family sorted by name ascending.
    fn list_families(&self) -> RepoResult<Vec<Family>>;
    /// Links a person to a family, replacing any previous link.
    fn attach_person_to_family(&mut self, person_id: PersonId, family_id: FamilyId)
        -> RepoResult<()>;
    /// Clears a person's family link. Unlinked people are left as is.
    fn detach_person(&mut self, person_id: PersonId) -> RepoResult<()>;
    /// Deletes a family and detaches its members.
    fn delete_family(&mut self, id: FamilyId) -> RepoResult<()>;
}

impl FamilyRepository for SqliteRepository<'_> {
    fn create_family(&mut self, name: &str) -> RepoResult<Family> {
        let family = Family::new(name);
        family.validate()?;

        self.write(|tx| {
            tx.execute(
                "INSERT INTO families (uuid, name) VALUES (?1, ?2);",
                params![family.id.to_string(), family.name.as_str()],
            )
            .map_err(RepoError::write)?;
            Ok(())
        })?;

        Ok(family)
    }

    fn get_family(&self, id: FamilyId) -> RepoResult<Option<Family>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{FAMILY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_family_row(conn, row)?)),
            None => Ok(None),
        }
    }

    fn list_families(&self) -> RepoResult<Vec<Family>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{FAMILY_SELECT_SQL} ORDER BY name ASC, seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut families = Vec::new();
        while let Some(row) = rows.next()? {
            families.push(parse_family_row(conn, row)?);
        }
        Ok(families)
    }

    fn attach_person_to_family(
        &mut self,
        person_id: PersonId,
        family_id: FamilyId,
    ) -> RepoResult<()> {
        self.write(|tx| {
            if !row_exists(tx, "people", person_id)? {
                return Err(RepoError::PersonNotFound(person_id));
            }
            if !row_exists(tx, "families", family_id)? {
                return Err(RepoError::FamilyNotFound(family_id));
            }

            tx.execute(
                "UPDATE people
                 SET
                    family_uuid = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?1;",
                params![person_id.to_string(), family_id.to_string()],
            )
            .map_err(RepoError::write)?;
            Ok(())
        })
    }

    fn detach_person(&mut self, person_id: PersonId) -> RepoResult<()> {
        self.write(|tx| {
            let changed = tx
                .execute(
                    "UPDATE people
                     SET
                        family_uuid = NULL,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE uuid = ?1;",
                    [person_id.to_string()],
                )
                .map_err(RepoError::write)?;
            if changed == 0 {
                return Err(RepoError::PersonNotFound(person_id));
            }
            Ok(())
        })
    }

    fn delete_family(&mut self, id: FamilyId) -> RepoResult<()> {
        self.write(|tx| {
            let family_uuid = id.to_string();
            tx.execute(
                "UPDATE people
                 SET
                    family_uuid = NULL,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE family_uuid = ?1;",
                [family_uuid.as_str()],
            )
            .map_err(RepoError::write)?;

            let changed = tx
                .execute(
                    "DELETE FROM families WHERE uuid = ?1;",
                    [family_uuid.as_str()],
                )
                .map_err(RepoError::write)?;
            if changed == 0 {
                return Err(RepoError::FamilyNotFound(id));
            }
            Ok(())
        })
    }
}

fn parse_family_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Family> {
    let uuid_text: String = row.get("uuid")?;
    let family = Family {
        id: parse_uuid(&uuid_text, "families.uuid")?,
        name: row.get("name")?,
        people: family_member_ids(conn, &uuid_text)?,
    };
    family.validate()?;
    Ok(family)
}
