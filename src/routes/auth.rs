use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, ResponseError, get, post, web};

use crate::dto::api::{ErrorResponse, LoginResponse, SessionResponse};
use crate::forms::auth::LoginForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, auth as auth_service};

const REJECTED_MESSAGE: &str = "Incorrect identifier or secret.";

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    let conceal = server_config.auth.conceal_unknown_identifiers;

    match auth_service::verify(repo.get_ref(), &form.identifier, &form.secret) {
        Ok(user) => {
            if let Err(err) = Identity::login(&req.extensions(), user.identifier.to_string()) {
                log::error!("Failed to attach identity to session: {err}");
                return HttpResponse::InternalServerError()
                    .json(ErrorResponse::new("failed to start session"));
            }
            HttpResponse::Ok().json(LoginResponse::authenticated(&user))
        }
        Err(ServiceError::NotFound(_)) if conceal => {
            HttpResponse::BadRequest().json(LoginResponse::rejected(REJECTED_MESSAGE))
        }
        Err(ServiceError::NotFound(_)) => {
            HttpResponse::NotFound().json(LoginResponse::rejected("User not found."))
        }
        Err(ServiceError::WrongSecret) => {
            let message = if conceal {
                REJECTED_MESSAGE
            } else {
                "Incorrect secret."
            };
            HttpResponse::BadRequest().json(LoginResponse::rejected(message))
        }
        Err(err @ ServiceError::InvalidInput(_)) => {
            HttpResponse::BadRequest().json(LoginResponse::rejected(err.to_string()))
        }
        Err(err) => {
            log::error!("Failed to verify credentials: {err}");
            err.error_response()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out." }))
}

/// Role of the user bound to the current session.
#[get("/session/role")]
pub async fn session_role(
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let identifier = user
        .and_then(|identity| identity.id().ok())
        .ok_or(ServiceError::Unauthorized)?;

    let user = auth_service::current_user(repo.get_ref(), &identifier)?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(user)))
}
