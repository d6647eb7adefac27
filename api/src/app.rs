//! Application state and factory
//!
//! Builds the service graph from configuration and assembles the Actix-web
//! application around it.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};
use log::info;
use re_core::{
    domain::entities::identity::Identity,
    repositories::{InMemoryUserRepository, UserRepository},
    services::{
        auth::{encoder_for, AuthService, PasswordEncoder},
        token::{TokenService, TokenServiceConfig},
    },
};
use re_shared::{error_codes, AppConfig};

use crate::dto::ErrorResponse;
use crate::handlers::json_error_handler;
use crate::middleware::{JwtAuth, TokenAuthenticator};
use crate::routes::{account::me, auth::authenticate};

/// Shared application state
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
}

impl<U> AppState<U>
where
    U: UserRepository + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        password_encoder: Arc<dyn PasswordEncoder>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                user_repository,
                password_encoder,
                token_service,
            )),
        }
    }

    /// The bearer-token resolver used by [`JwtAuth`]
    pub fn authenticator(&self) -> Arc<dyn TokenAuthenticator> {
        self.auth_service.clone()
    }
}

/// Wire the token service, password encoder and seeded credential store
pub fn build_state(config: &AppConfig) -> anyhow::Result<web::Data<AppState<InMemoryUserRepository>>> {
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt))?);
    let password_encoder = encoder_for(config.auth.password_encoder);

    let identities = config
        .auth
        .users
        .iter()
        .map(|seed| {
            Ok(Identity::new(
                seed.username.as_str(),
                password_encoder.encode(&seed.password)?,
                seed.authorities.iter().cloned(),
            ))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    info!(
        "Seeding {} user(s), password encoder {:?}, token lifetime {}s",
        identities.len(),
        config.auth.password_encoder,
        token_service.expires_in()
    );

    let user_repository = Arc::new(InMemoryUserRepository::with_identities(identities));

    Ok(web::Data::new(AppState::new(
        user_repository,
        password_encoder,
        token_service,
    )))
}

const HEALTH_PATH: &str = "/health";
const AUTH_SCOPE: &str = "/api/v1/auth";

/// Create and configure the application
///
/// `/health` and everything under `/api/v1/auth` are public. Every other
/// path, including unknown ones, requires a valid bearer token.
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let jwt_auth = JwtAuth::new(app_state.authenticator())
        .public_path(HEALTH_PATH)
        .public_path(AUTH_SCOPE);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(jwt_auth)
        .wrap(Logger::default())
        .route(HEALTH_PATH, web::get().to(health_check))
        .service(
            web::scope(AUTH_SCOPE)
                .route("/authenticate", web::post().to(authenticate::<U>)),
        )
        .service(web::scope("/api/v1").route("/me", web::get().to(me)))
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "keystone-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
