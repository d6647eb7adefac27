//! Shared fixtures for the HTTP integration tests

use actix_web::web;
use re_api::{build_state, AppState};
use re_core::repositories::InMemoryUserRepository;
use re_core::services::token::{TokenService, TokenServiceConfig};
use re_shared::{AppConfig, JwtConfig, UserSeed};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt = JwtConfig::new(TEST_SECRET);
    config.auth.users = vec![
        UserSeed::new("admin@example.com", "password", &["ROLE_ADMIN"]),
        UserSeed::new("a@x.com", "password", &["ROLE_USER"]),
    ];
    config
}

pub fn test_state() -> web::Data<AppState<InMemoryUserRepository>> {
    build_state(&test_config()).unwrap()
}

/// Token service with the same key as the app, for minting test tokens
#[allow(dead_code)]
pub fn test_tokens() -> TokenService {
    TokenService::new(TokenServiceConfig::from(&test_config().auth.jwt)).unwrap()
}
