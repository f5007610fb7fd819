use peoplebook_core::{
    Family, FamilyValidationError, Person, DEFAULT_PERSON_AGE, DEFAULT_PERSON_GENDER,
};
use uuid::Uuid;

#[test]
fn new_person_gets_fresh_id_and_defaults() {
    let first = Person::new(Some("Alice".to_string()));
    let second = Person::new(Some("Alice".to_string()));

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_eq!(first.age, DEFAULT_PERSON_AGE);
    assert_eq!(first.gender, DEFAULT_PERSON_GENDER);
}

#[test]
fn person_serialization_uses_expected_fields() {
    let person_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let family_id = Uuid::parse_str("66666666-7777-4888-9999-000000000000").unwrap();
    let mut person = Person::with_id(person_id, None);
    person.family_id = Some(family_id);

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["id"], person_id.to_string());
    assert!(json["name"].is_null());
    assert_eq!(json["age"], 20);
    assert_eq!(json["gender"], "Male");
    assert_eq!(json["family_id"], family_id.to_string());

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}

#[test]
fn family_validation_and_membership() {
    let mut family = Family::new("ABC family");
    assert!(family.validate().is_ok());
    assert!(family.people.is_empty());

    let member = Uuid::new_v4();
    family.people.push(member);
    assert!(family.contains(member));
    assert!(!family.contains(Uuid::new_v4()));

    family.name = " ".to_string();
    assert_eq!(family.validate(), Err(FamilyValidationError::BlankName));
}
