//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::pet::{NewPet, Pet};
use crate::domain::types::Identifier;
use crate::domain::user::{Credential, NewCredential};
use crate::domain::vet::{NewVet, Vet};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, CredentialReader, PetListQuery, PetReader,
    PetWriter, VetListQuery, VetReader, VetWriter,
};

mock! {
    pub Repository {}

    impl CredentialReader for Repository {
        fn get_credential_by_identifier(
            &self,
            identifier: &Identifier,
        ) -> RepositoryResult<Option<Credential>>;
    }

    impl ClientReader for Repository {
        fn get_client_by_identifier(
            &self,
            identifier: &Identifier,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: &ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_client(
            &self,
            credential: &NewCredential,
            client: &NewClient,
        ) -> RepositoryResult<Client>;
    }

    impl PetReader for Repository {
        fn list_pets(&self, query: &PetListQuery) -> RepositoryResult<(usize, Vec<Pet>)>;
    }

    impl PetWriter for Repository {
        fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet>;
    }

    impl VetReader for Repository {
        fn list_vets(&self, query: &VetListQuery) -> RepositoryResult<(usize, Vec<Vet>)>;
    }

    impl VetWriter for Repository {
        fn create_vet(&self, credential: &NewCredential, vet: &NewVet) -> RepositoryResult<Vet>;
    }
}
