use actix_web::{HttpRequest, HttpResponse, get, post, web};

use crate::dto::api::{ListParams, PageResponse};
use crate::forms::pets::RegisterPetForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::request_base_url;
use crate::services::{ServiceError, pets as pets_service};

#[get("/pets")]
pub async fn list_pets(
    req: HttpRequest,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let page = pets_service::list_pets(repo.get_ref(), &params, &server_config.pagination)?;

    let body = PageResponse::new(page, &request_base_url(&req), &params)
        .map_err(|err| ServiceError::Unexpected(format!("failed to build page links: {err}")))?;

    Ok(HttpResponse::Ok().json(body))
}

#[post("/pets")]
pub async fn register_pet(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterPetForm>,
) -> Result<HttpResponse, ServiceError> {
    match pets_service::register_pet(repo.get_ref(), form) {
        Ok(pet) => Ok(HttpResponse::Created().json(pet)),
        Err(err) => {
            log::warn!("Pet registration rejected: {err}");
            Err(err)
        }
    }
}
