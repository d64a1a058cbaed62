#![allow(dead_code)]

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use vetclinic_admin::db::{ConnectionOptions, DbPool, establish_connection_pool};
use vetclinic_admin::domain::client::{Client, NewClient};
use vetclinic_admin::domain::pet::{NewPet, Pet};
use vetclinic_admin::domain::types::{
    Breed, EmailAddress, Identifier, NationalId, PersonName, PetName, PetSex, PhoneNumber, Role,
    Species,
};
use vetclinic_admin::domain::user::NewCredential;
use vetclinic_admin::domain::vet::{NewVet, Vet};
use vetclinic_admin::repository::{ClientWriter, DieselRepository, PetWriter, VetWriter};
use vetclinic_admin::schema::{clients, users};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// A migrated SQLite database living in a temporary directory.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url, ConnectionOptions::default())
            .expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    /// Inserts a bare credential, e.g. for staff accounts.
    pub fn insert_user(&self, identifier: &str, secret_hash: &str, role: Role) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(users::table)
            .values((
                users::identifier.eq(identifier),
                users::secret_hash.eq(secret_hash),
                users::role.eq(role.code()),
            ))
            .execute(&mut conn)
            .expect("insert user");
    }

    /// Inserts a `clients` row for an existing credential without checking
    /// its role.
    pub fn insert_client_profile(&self, identifier: &str, name: &str) {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(clients::table)
            .values((
                clients::identifier.eq(identifier),
                clients::national_id.eq(format!("ID-{identifier}")),
                clients::name.eq(name),
                clients::phone.eq("+573001234567"),
                clients::email.eq(format!("{identifier}@example.com")),
            ))
            .execute(&mut conn)
            .expect("insert client profile");
    }
}

pub fn new_client(identifier: &str, name: &str) -> NewClient {
    NewClient::new(
        Identifier::new(identifier).unwrap(),
        NationalId::new(format!("ID-{identifier}")).unwrap(),
        PersonName::new(name).unwrap(),
        PhoneNumber::new("+573001234567").unwrap(),
        EmailAddress::new(format!("{identifier}@example.com")).unwrap(),
    )
}

pub fn create_client(repo: &DieselRepository, identifier: &str, name: &str) -> Client {
    let credential = NewCredential {
        identifier: Identifier::new(identifier).unwrap(),
        secret_hash: "not-a-real-hash".to_string(),
        role: Role::Client,
    };
    repo.create_client(&credential, &new_client(identifier, name))
        .expect("create client")
}

pub fn new_pet(owner: &str, name: &str, species: &str, birth_date: NaiveDate) -> NewPet {
    NewPet {
        name: PetName::new(name).unwrap(),
        species: Species::new(species).unwrap(),
        breed: Breed::new("Criollo").unwrap(),
        sex: PetSex::new("Hembra").unwrap(),
        birth_date,
        owner: Identifier::new(owner).unwrap(),
    }
}

pub fn create_pet(
    repo: &DieselRepository,
    owner: &str,
    name: &str,
    species: &str,
    birth_date: NaiveDate,
) -> Pet {
    repo.create_pet(&new_pet(owner, name, species, birth_date))
        .expect("create pet")
}

pub fn create_vet(repo: &DieselRepository, identifier: &str, name: &str) -> Vet {
    let credential = NewCredential {
        identifier: Identifier::new(identifier).unwrap(),
        secret_hash: "not-a-real-hash".to_string(),
        role: Role::Veterinarian,
    };
    let vet = NewVet::new(
        Identifier::new(identifier).unwrap(),
        NationalId::new(format!("VET-{identifier}")).unwrap(),
        PersonName::new(name).unwrap(),
        PhoneNumber::new("+573211234567").unwrap(),
        EmailAddress::new(format!("{identifier}@clinic.example")).unwrap(),
    );
    repo.create_vet(&credential, &vet).expect("create vet")
}
