//! Client listing and registration.

use crate::domain::client::Client;
use crate::domain::query::ClientField;
use crate::domain::types::{PhoneRegion, Role};
use crate::dto::api::ListParams;
use crate::forms::accounts::RegisterAccountForm;
use crate::models::config::HashingConfig;
use crate::pagination::{Page, PaginationConfig};
use crate::repository::errors::RepositoryError;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::auth::new_credential;
use crate::services::{ServiceError, ServiceResult, listing_request};

/// Returns one page of clients filtered and ordered by the request parameters.
pub fn list_clients<R>(
    repo: &R,
    params: &ListParams,
    config: &PaginationConfig,
) -> ServiceResult<Page<Client>>
where
    R: ClientReader + ?Sized,
{
    let (spec, request) = listing_request::<ClientField>(params, config)?;

    let (total, clients) = repo
        .list_clients(&ClientListQuery::new(spec).paginate(request))
        .map_err(|err| {
            log::error!("Failed to list clients: {err}");
            ServiceError::from(err)
        })?;

    Ok(Page::new(clients, total, request))
}

/// Validates the form and stores the client with a hashed credential.
/// National phone numbers are read in `region`.
pub fn register_client<R>(
    repo: &R,
    form: RegisterAccountForm,
    hashing: &HashingConfig,
    region: PhoneRegion,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let (new_client, secret) = form.into_new_client(region)?;
    let credential = new_credential(new_client.identifier.clone(), &secret, Role::Client, hashing)?;

    match repo.create_client(&credential, &new_client) {
        Ok(client) => {
            log::info!("Registered client {}", client.identifier);
            Ok(client)
        }
        Err(RepositoryError::UniqueViolation(_)) => Err(ServiceError::duplicate_identifier()),
        Err(err) => {
            log::error!("Failed to register client: {err}");
            Err(ServiceError::from(err))
        }
    }
}
