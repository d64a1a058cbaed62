//! Veterinarian listing and registration.

use crate::domain::query::VetField;
use crate::domain::types::{PhoneRegion, Role};
use crate::domain::vet::Vet;
use crate::dto::api::ListParams;
use crate::forms::accounts::RegisterAccountForm;
use crate::models::config::HashingConfig;
use crate::pagination::{Page, PaginationConfig};
use crate::repository::errors::RepositoryError;
use crate::repository::{VetListQuery, VetReader, VetWriter};
use crate::services::auth::new_credential;
use crate::services::{ServiceError, ServiceResult, listing_request};

/// Returns one page of veterinarians filtered and ordered by the request
/// parameters.
pub fn list_vets<R>(
    repo: &R,
    params: &ListParams,
    config: &PaginationConfig,
) -> ServiceResult<Page<Vet>>
where
    R: VetReader + ?Sized,
{
    let (spec, request) = listing_request::<VetField>(params, config)?;

    let (total, vets) = repo
        .list_vets(&VetListQuery::new(spec).paginate(request))
        .map_err(|err| {
            log::error!("Failed to list vets: {err}");
            ServiceError::from(err)
        })?;

    Ok(Page::new(vets, total, request))
}

/// Stores a veterinarian profile with a hashed credential of role
/// veterinarian.
pub fn register_vet<R>(
    repo: &R,
    form: RegisterAccountForm,
    hashing: &HashingConfig,
    region: PhoneRegion,
) -> ServiceResult<Vet>
where
    R: VetWriter + ?Sized,
{
    let (new_vet, secret) = form.into_new_vet(region)?;
    let credential =
        new_credential(new_vet.identifier.clone(), &secret, Role::Veterinarian, hashing)?;

    match repo.create_vet(&credential, &new_vet) {
        Ok(vet) => {
            log::info!("Registered vet {}", vet.identifier);
            Ok(vet)
        }
        Err(RepositoryError::UniqueViolation(_)) => Err(ServiceError::duplicate_identifier()),
        Err(err) => {
            log::error!("Failed to register vet: {err}");
            Err(ServiceError::from(err))
        }
    }
}
