//! HTTP layer for the Keystone authentication service.
//!
//! Exposes the login endpoint, the bearer-token request filter and the
//! routes it protects. Library form so integration tests can build the app.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{build_state, create_app, AppState};
