use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::dto::api::{ListParams, PageResponse};
use crate::forms::accounts::RegisterAccountForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::request_base_url;
use crate::services::{ServiceError, vets as vets_service};

#[get("/vets")]
pub async fn list_vets(
    req: HttpRequest,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let page = vets_service::list_vets(repo.get_ref(), &params, &server_config.pagination)?;

    let body = PageResponse::new(page, &request_base_url(&req), &params)
        .map_err(|err| ServiceError::Unexpected(format!("failed to build page links: {err}")))?;

    Ok(HttpResponse::Ok().json(body))
}

#[post("/vets")]
pub async fn register_vet(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<RegisterAccountForm>,
) -> Result<HttpResponse, ServiceError> {
    let vet = vets_service::register_vet(
        repo.get_ref(),
        form,
        &server_config.auth.hashing,
        server_config.phone_region,
    )?;

    Ok(HttpResponse::Created().json(vet))
}
