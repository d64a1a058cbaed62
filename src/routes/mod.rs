//! HTTP handlers for the clinic API.

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::dto::api::ErrorResponse;
use crate::services::ServiceError;

pub mod auth;
pub mod clients;
pub mod pets;
pub mod vets;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_)
            | ServiceError::WrongSecret
            | ServiceError::InvalidField(_)
            | ServiceError::InvalidSearchValue(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) | ServiceError::OwnerNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

/// Absolute URL of the current request without its query string.
pub fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), req.path())
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let body = ErrorResponse::new(err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Registers every API handler. Malformed query strings and JSON bodies get
/// the same `{"error": ...}` body as service failures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .service(auth::login)
        .service(auth::logout)
        .service(auth::session_role)
        .service(clients::list_clients)
        .service(clients::register_client)
        .service(pets::list_pets)
        .service(pets::register_pet)
        .service(vets::list_vets)
        .service(vets::register_vet);
}
