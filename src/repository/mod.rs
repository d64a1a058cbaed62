use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sqlite::SqliteConnection;

use crate::{
    db::DbPool,
    domain::{
        client::{Client, NewClient},
        pet::{NewPet, Pet},
        query::{ClientField, PetField, QuerySpec, VetField, contains_pattern},
        types::Identifier,
        user::{Credential, NewCredential},
        vet::{NewVet, Vet},
    },
    pagination::PageRequest,
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod pet;
pub mod user;
pub mod vet;

/// Sorts a boxed query on one column in the requested direction.
macro_rules! sorted {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            $crate::domain::query::SortDirection::Asc => $query.order_by($column.asc()),
            $crate::domain::query::SortDirection::Desc => $query.order_by($column.desc()),
        }
    };
}
pub(crate) use sorted;

/// `LIKE` pattern for a case-folded search term, matched against
/// `casefold(column)`.
fn folded_pattern(term: &str) -> String {
    contains_pattern(&term.to_lowercase())
}

/// SQL `OFFSET` and `LIMIT` for `request`, or `None` when the page starts
/// after the last of `total` rows.
fn page_window(request: &PageRequest, total: usize) -> Option<(i64, i64)> {
    let offset = request.offset();
    if offset >= total {
        return None;
    }
    let offset = i64::try_from(offset).ok()?;
    let limit = i64::try_from(request.limit()).unwrap_or(i64::MAX);
    Some((offset, limit))
}

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub spec: QuerySpec<ClientField>,
    pub pagination: Option<PageRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct PetListQuery {
    pub spec: QuerySpec<PetField>,
    pub pagination: Option<PageRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct VetListQuery {
    pub spec: QuerySpec<VetField>,
    pub pagination: Option<PageRequest>,
}

impl ClientListQuery {
    pub fn new(spec: QuerySpec<ClientField>) -> Self {
        Self {
            spec,
            pagination: None,
        }
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

impl PetListQuery {
    pub fn new(spec: QuerySpec<PetField>) -> Self {
        Self {
            spec,
            pagination: None,
        }
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

impl VetListQuery {
    pub fn new(spec: QuerySpec<VetField>) -> Self {
        Self {
            spec,
            pagination: None,
        }
    }

    pub fn paginate(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request);
        self
    }
}

pub trait CredentialReader {
    fn get_credential_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> RepositoryResult<Option<Credential>>;
}

pub trait ClientReader {
    /// Client profile whose credential carries the client role.
    fn get_client_by_identifier(&self, identifier: &Identifier)
    -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    /// Stores the credential and its client profile atomically.
    fn create_client(
        &self,
        credential: &NewCredential,
        client: &NewClient,
    ) -> RepositoryResult<Client>;
}

pub trait PetReader {
    fn list_pets(&self, query: &PetListQuery) -> RepositoryResult<(usize, Vec<Pet>)>;
}

pub trait PetWriter {
    fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet>;
}

pub trait VetReader {
    fn list_vets(&self, query: &VetListQuery) -> RepositoryResult<(usize, Vec<Vet>)>;
}

pub trait VetWriter {
    /// Stores the credential and its veterinarian profile atomically.
    fn create_vet(&self, credential: &NewCredential, vet: &NewVet) -> RepositoryResult<Vet>;
}

/// Diesel implementation of every repository trait over one connection pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }
}
