use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::dto::api::{ListParams, PageResponse};
use crate::forms::accounts::RegisterAccountForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::request_base_url;
use crate::services::{ServiceError, clients as clients_service};

#[get("/clients")]
pub async fn list_clients(
    req: HttpRequest,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let page = clients_service::list_clients(repo.get_ref(), &params, &server_config.pagination)?;

    let body = PageResponse::new(page, &request_base_url(&req), &params)
        .map_err(|err| ServiceError::Unexpected(format!("failed to build page links: {err}")))?;

    Ok(HttpResponse::Ok().json(body))
}

#[post("/clients")]
pub async fn register_client(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<RegisterAccountForm>,
) -> Result<HttpResponse, ServiceError> {
    let client = clients_service::register_client(
        repo.get_ref(),
        form,
        &server_config.auth.hashing,
        server_config.phone_region,
    )?;

    Ok(HttpResponse::Created().json(client))
}
