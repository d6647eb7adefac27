use actix_web::{web, HttpResponse};
use re_core::{
    errors::{AuthError, DomainError},
    repositories::UserRepository,
};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{AuthenticateRequest, AuthenticateResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/authenticate
///
/// Checks the credentials and returns a signed bearer token.
///
/// # Responses
/// - 200 OK: token issued
/// - 400 Bad Request: body missing fields or not a valid e-mail
/// - 401 Unauthorized: unknown user or wrong password, reported identically
pub async fn authenticate<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<AuthenticateRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .auth_service
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthenticateResponse::from(response)),
        // Do not reveal which usernames exist
        Err(DomainError::Auth(AuthError::UnknownSubject { .. })) => {
            handle_domain_error(AuthError::BadCredentials.into())
        }
        Err(error) => handle_domain_error(error),
    }
}
