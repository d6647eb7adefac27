use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    Error, HttpRequest, HttpResponse,
};
use re_core::errors::{AuthError, DomainError, TokenError};
use re_shared::error_codes;
use validator::ValidationErrors;

use crate::dto::ErrorResponse;

/// Map a domain error to its HTTP status, error code and client message
fn describe(error: &DomainError) -> (StatusCode, &'static str, &'static str) {
    match error {
        DomainError::Token(TokenError::MalformedToken) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid authentication token",
        ),
        DomainError::Token(TokenError::ExpiredToken) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Authentication token has expired",
        ),
        DomainError::Token(TokenError::TokenGenerationFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::TOKEN_GENERATION_FAILED,
            "Failed to generate authentication token",
        ),
        DomainError::Auth(AuthError::UnknownSubject { .. }) => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNKNOWN_SUBJECT,
            "Token subject is not a known user",
        ),
        DomainError::Auth(AuthError::BadCredentials) => (
            StatusCode::UNAUTHORIZED,
            error_codes::BAD_CREDENTIALS,
            "Invalid username or password",
        ),
        DomainError::Validation { .. } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            "Invalid request data",
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "Resource not found",
        ),
        DomainError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::CONFIGURATION_ERROR,
            "Service is misconfigured",
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "An internal error occurred",
        ),
    }
}

/// Convert a domain error into a JSON error response
///
/// Authentication failures carry a `WWW-Authenticate: Bearer` challenge.
/// Internal details are logged, never returned.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code, message) = describe(&error);

    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::debug!("Request rejected: {}", error);
    }

    let mut response = HttpResponse::build(status);
    if error.is_authentication_failure() {
        response.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
    }

    let mut body = ErrorResponse::new(code, message);
    if let DomainError::Validation { message } = &error {
        body = body.add_detail("reason", message);
    }

    response.json(body)
}

/// 401 for requests that carry no usable credentials at all
pub fn unauthorized_response(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
        .json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}

/// 400 response listing field validation failures
pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("validation_errors", errors),
    )
}

/// Report unreadable JSON bodies in the standard error shape
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> Error {
    log::debug!("Rejected request body: {}", error);
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body")
            .add_detail("reason", error.to_string()),
    );
    InternalError::from_response(error, response).into()
}
