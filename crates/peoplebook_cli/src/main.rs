//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `peoplebook_core` linkage without the Flutter runtime.
//! - Run the relationship demo on a throwaway in-memory store.

use peoplebook_core::db::open_db_in_memory;
use peoplebook_core::{FamilyService, PersonRepository, SqliteRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("peoplebook_core ping={}", peoplebook_core::ping());
    println!("peoplebook_core version={}", peoplebook_core::core_version());

    match run_relationship_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("relationship demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_relationship_demo() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = open_db_in_memory()?;
    let repo = SqliteRepository::try_new(&mut conn)?;
    let mut service = FamilyService::new(repo);

    let family = service.seed_relationship_demo()?;
    println!(
        "family id={} name={} members={}",
        family.id,
        family.name,
        family.people.len()
    );

    for person in service.repository().list_people()? {
        let family_label = person
            .family_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!(
            "person id={} name={} age={} gender={} family={}",
            person.id,
            person.display_name(),
            person.age,
            person.gender,
            family_label
        );
    }
    Ok(())
}
