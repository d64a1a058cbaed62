//! Pet listing and registration.

use chrono::{Local, NaiveDate};

use crate::domain::pet::Pet;
use crate::domain::query::PetField;
use crate::domain::types::Identifier;
use crate::dto::api::ListParams;
use crate::forms::pets::RegisterPetForm;
use crate::pagination::{Page, PaginationConfig};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientReader, PetListQuery, PetReader, PetWriter};
use crate::services::{ServiceError, ServiceResult, listing_request};

/// Returns one page of pets filtered and ordered by the request parameters.
///
/// Searching the birth date column takes an age in whole years.
pub fn list_pets<R>(
    repo: &R,
    params: &ListParams,
    config: &PaginationConfig,
) -> ServiceResult<Page<Pet>>
where
    R: PetReader + ?Sized,
{
    let (spec, request) = listing_request::<PetField>(params, config)?;

    let (total, pets) = repo
        .list_pets(&PetListQuery::new(spec).paginate(request))
        .map_err(|err| {
            log::error!("Failed to list pets: {err}");
            ServiceError::from(err)
        })?;

    Ok(Page::new(pets, total, request))
}

/// Registers a pet for an existing client.
pub fn register_pet<R>(repo: &R, form: RegisterPetForm) -> ServiceResult<Pet>
where
    R: ClientReader + PetWriter + ?Sized,
{
    register_pet_on(repo, form, Local::now().date_naive())
}

/// Same as [`register_pet`] with an explicit current date.
pub fn register_pet_on<R>(repo: &R, form: RegisterPetForm, today: NaiveDate) -> ServiceResult<Pet>
where
    R: ClientReader + PetWriter + ?Sized,
{
    let owner = Identifier::new(form.owner.as_str())
        .map_err(|_| ServiceError::InvalidInput("owner identifier is required".to_string()))?;

    let client = repo
        .get_client_by_identifier(&owner)
        .map_err(|err| {
            log::error!("Failed to look up pet owner {owner}: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::OwnerNotFound(owner.to_string()))?;

    let new_pet = form.into_new_pet(client.identifier, today)?;

    match repo.create_pet(&new_pet) {
        Ok(pet) => {
            log::info!("Registered pet {} for {}", pet.id, pet.owner);
            Ok(pet)
        }
        // Owner removed between lookup and insert.
        Err(RepositoryError::ForeignKeyViolation(_)) => {
            Err(ServiceError::OwnerNotFound(owner.to_string()))
        }
        Err(err) => {
            log::error!("Failed to register pet: {err}");
            Err(ServiceError::from(err))
        }
    }
}
