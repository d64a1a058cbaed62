//! Business workflows invoked by the HTTP handlers. Every function returns a
//! typed [`ServiceResult`]; nothing here panics on bad input.

use crate::domain::query::{QueryField, QuerySpec, build_query};
use crate::dto::api::ListParams;
use crate::pagination::{PageRequest, PaginationConfig};

pub mod auth;
pub mod clients;
pub mod errors;
pub mod pets;
pub mod vets;

pub use errors::{ServiceError, ServiceResult};

/// Resolves listing parameters into a validated query and page window.
fn listing_request<F: QueryField>(
    params: &ListParams,
    config: &PaginationConfig,
) -> ServiceResult<(QuerySpec<F>, PageRequest)> {
    let spec = build_query::<F>(
        params.search.as_deref(),
        params.column.as_deref(),
        params.order.as_deref(),
    )?;
    let request = PageRequest::resolve(params.page, params.page_size, config);
    Ok((spec, request))
}
