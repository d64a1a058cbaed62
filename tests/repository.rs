use chrono::{Datelike, Local, NaiveDate};

use vetclinic_admin::domain::query::{ClientField, PetField, VetField, build_query};
use vetclinic_admin::domain::types::{Identifier, Role};
use vetclinic_admin::pagination::{PageRequest, PaginationConfig};
use vetclinic_admin::repository::errors::RepositoryError;
use vetclinic_admin::repository::{
    ClientListQuery, ClientReader, CredentialReader, PetListQuery, PetReader, PetWriter,
    VetListQuery, VetReader,
};

mod common;

fn client_query(search: Option<&str>, column: Option<&str>, order: Option<&str>) -> ClientListQuery {
    ClientListQuery::new(build_query::<ClientField>(search, column, order).unwrap())
}

fn pet_query(search: Option<&str>, column: Option<&str>, order: Option<&str>) -> PetListQuery {
    PetListQuery::new(build_query::<PetField>(search, column, order).unwrap())
}

fn vet_query(search: Option<&str>, column: Option<&str>, order: Option<&str>) -> VetListQuery {
    VetListQuery::new(build_query::<VetField>(search, column, order).unwrap())
}

fn page(number: usize, size: usize) -> PageRequest {
    PageRequest::resolve(Some(number), Some(size), &PaginationConfig::default())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_client_registration_stores_credential_and_profile() {
    let test_db = common::TestDb::new("test_client_registration.db");
    let repo = test_db.repo();

    let created = common::create_client(&repo, "ana", "Ana Pérez");
    assert_eq!(created.identifier.as_str(), "ana");
    assert_eq!(created.email.as_str(), "ana@example.com");

    let credential = repo
        .get_credential_by_identifier(&Identifier::new("ana").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(credential.role, Role::Client);

    let fetched = repo
        .get_client_by_identifier(&Identifier::new("ana").unwrap())
        .unwrap();
    assert_eq!(fetched, Some(created));

    assert!(
        repo.get_credential_by_identifier(&Identifier::new("nobody").unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_duplicate_client_is_a_unique_violation() {
    let test_db = common::TestDb::new("test_duplicate_client.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");

    let credential = vetclinic_admin::domain::user::NewCredential {
        identifier: Identifier::new("ana").unwrap(),
        secret_hash: "other".to_string(),
        role: Role::Client,
    };
    let result = vetclinic_admin::repository::ClientWriter::create_client(
        &repo,
        &credential,
        &common::new_client("ana", "Someone Else"),
    );
    assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));

    let (total, _) = repo.list_clients(&ClientListQuery::default()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_staff_account_is_not_a_client() {
    let test_db = common::TestDb::new("test_staff_not_client.db");
    test_db.insert_user("dr-lopez", "hash", Role::Veterinarian);
    let repo = test_db.repo();

    assert!(
        repo.get_client_by_identifier(&Identifier::new("dr-lopez").unwrap())
            .unwrap()
            .is_none()
    );
    let credential = repo
        .get_credential_by_identifier(&Identifier::new("dr-lopez").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(credential.role, Role::Veterinarian);
}

#[test]
fn test_client_search_filters_on_chosen_column() {
    let test_db = common::TestDb::new("test_client_search.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");
    common::create_client(&repo, "bruno", "Bruno Díaz");
    common::create_client(&repo, "carla", "Carla Ana Ruiz");

    let (total, items) = repo
        .list_clients(&client_query(Some("ana"), Some("name"), None))
        .unwrap();
    assert_eq!(total, 2);
    let names: Vec<_> = items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Pérez", "Carla Ana Ruiz"]);

    let (total, items) = repo
        .list_clients(&client_query(Some("bru"), Some("usuario"), None))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].identifier.as_str(), "bruno");

    let (total, _) = repo
        .list_clients(&client_query(Some("nobody"), None, None))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_client_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_client_wildcards.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");
    common::create_client(&repo, "a_b", "Underscore");

    let (total, items) = repo
        .list_clients(&client_query(Some("_"), Some("identifier"), None))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].identifier.as_str(), "a_b");

    let (total, _) = repo
        .list_clients(&client_query(Some("%"), Some("identifier"), None))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_client_listing_sorts_and_paginates() {
    let test_db = common::TestDb::new("test_client_paging.db");
    let repo = test_db.repo();

    for n in 1..=25 {
        common::create_client(&repo, &format!("client{n:02}"), &format!("Client {n:02}"));
    }

    let mut seen = Vec::new();
    for (number, expected_len) in [(1, 10), (2, 10), (3, 5), (4, 0)] {
        let (total, items) = repo
            .list_clients(&client_query(None, Some("identifier"), None).paginate(page(number, 10)))
            .unwrap();
        assert_eq!(total, 25);
        assert_eq!(items.len(), expected_len);
        seen.extend(items.into_iter().map(|c| c.identifier.into_inner()));
    }

    let expected: Vec<String> = (1..=25).map(|n| format!("client{n:02}")).collect();
    assert_eq!(seen, expected);

    let (_, items) = repo
        .list_clients(&client_query(None, Some("identifier"), Some("desc")).paginate(page(1, 3)))
        .unwrap();
    let identifiers: Vec<_> = items.iter().map(|c| c.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["client25", "client24", "client23"]);
}

#[test]
fn test_huge_page_number_is_an_empty_page() {
    let test_db = common::TestDb::new("test_client_huge_page.db");
    let repo = test_db.repo();

    for identifier in ["ana", "bruno", "carla"] {
        common::create_client(&repo, identifier, identifier);
    }

    for number in [1 << 62, usize::MAX] {
        let (total, items) = repo
            .list_clients(&client_query(None, None, None).paginate(page(number, 10)))
            .unwrap();
        assert_eq!(total, 3);
        assert!(items.is_empty());
    }
}

#[test]
fn test_search_ignores_case_beyond_ascii() {
    let test_db = common::TestDb::new("test_client_unicode_search.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "ANA PÉREZ ÑUÑEZ");
    common::create_client(&repo, "bruno", "Bruno Diaz");

    for term in ["pérez", "ñuñez", "Ñ", "PÉREZ"] {
        let (total, items) = repo
            .list_clients(&client_query(Some(term), Some("name"), None))
            .unwrap();
        assert_eq!(total, 1, "search term {term}");
        assert_eq!(items[0].identifier.as_str(), "ana");
    }

    let (total, _) = repo
        .list_clients(&client_query(Some("perez"), Some("name"), None))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_client_listing_skips_profiles_of_other_roles() {
    let test_db = common::TestDb::new("test_client_role_filter.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");
    test_db.insert_user("dr-lopez", "hash", Role::Veterinarian);
    test_db.insert_client_profile("dr-lopez", "Julián López");

    let (total, items) = repo.list_clients(&ClientListQuery::default()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].identifier.as_str(), "ana");

    let (total, _) = repo
        .list_clients(&client_query(Some("lópez"), Some("name"), None))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_vet_registration_and_listing() {
    let test_db = common::TestDb::new("test_vets.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");
    let created = common::create_vet(&repo, "dr-lopez", "Julián López");
    common::create_vet(&repo, "dr-ruiz", "Marta Ruiz");
    assert_eq!(created.phone.as_str(), "+573211234567");

    let credential = repo
        .get_credential_by_identifier(&Identifier::new("dr-lopez").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(credential.role, Role::Veterinarian);

    let (total, items) = repo.list_vets(&VetListQuery::default()).unwrap();
    assert_eq!(total, 2);
    let names: Vec<_> = items.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Julián López", "Marta Ruiz"]);

    let (total, items) = repo
        .list_vets(&vet_query(Some("RUIZ"), Some("nombre"), None))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].identifier.as_str(), "dr-ruiz");

    let (_, items) = repo
        .list_vets(&vet_query(None, Some("identifier"), Some("desc")).paginate(page(1, 1)))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].identifier.as_str(), "dr-ruiz");

    let (total, _) = repo.list_clients(&ClientListQuery::default()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_pet_requires_existing_owner() {
    let test_db = common::TestDb::new("test_pet_owner_fk.db");
    let repo = test_db.repo();

    let result = repo.create_pet(&common::new_pet("ghost", "Luna", "Canino", date(2020, 3, 1)));
    assert!(matches!(
        result,
        Err(RepositoryError::ForeignKeyViolation(_))
    ));

    let (total, _) = repo.list_pets(&PetListQuery::default()).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_pet_search_by_age_matches_birth_year() {
    let test_db = common::TestDb::new("test_pet_age_search.db");
    let repo = test_db.repo();
    let this_year = Local::now().date_naive().year();

    common::create_client(&repo, "ana", "Ana Pérez");
    common::create_pet(&repo, "ana", "Luna", "Canino", date(this_year - 5, 1, 1));
    common::create_pet(&repo, "ana", "Max", "Felino", date(this_year - 5, 12, 31));
    common::create_pet(&repo, "ana", "Toby", "Canino", date(this_year - 4, 1, 1));
    common::create_pet(&repo, "ana", "Kira", "Canino", date(this_year - 6, 12, 31));

    let (total, items) = repo
        .list_pets(&pet_query(Some("5"), Some("birth_date"), None))
        .unwrap();
    assert_eq!(total, 2);
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Luna", "Max"]);

    let (total, _) = repo
        .list_pets(&pet_query(Some("30"), Some("fecha_nacimiento"), None))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_pet_search_by_owner_and_sorting() {
    let test_db = common::TestDb::new("test_pet_owner_search.db");
    let repo = test_db.repo();

    common::create_client(&repo, "ana", "Ana Pérez");
    common::create_client(&repo, "bruno", "Bruno Díaz");
    common::create_pet(&repo, "ana", "Luna", "Canino", date(2019, 5, 1));
    common::create_pet(&repo, "bruno", "Max", "Felino", date(2021, 2, 1));
    common::create_pet(&repo, "ana", "Coco", "Ave", date(2022, 8, 9));

    let (total, items) = repo
        .list_pets(&pet_query(Some("ana"), Some("usuario_cliente"), None))
        .unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|p| p.owner.as_str() == "ana"));
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Coco", "Luna"]);

    let (_, items) = repo
        .list_pets(&pet_query(None, Some("birth_date"), Some("desc")))
        .unwrap();
    let names: Vec<_> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Coco", "Max", "Luna"]);

    let (total, items) = repo
        .list_pets(&pet_query(Some("feli"), Some("especie"), None))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name.as_str(), "Max");
}
