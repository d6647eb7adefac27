use actix_web::HttpResponse;

use crate::dto::ProfileResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/me
///
/// Echoes the identity the bearer token resolved to.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ProfileResponse {
        username: auth.username,
        authorities: auth.authorities,
    })
}
