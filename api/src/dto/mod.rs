//! Request and response bodies

pub mod auth_dto;

pub use auth_dto::{AuthenticateRequest, AuthenticateResponse, ProfileResponse};
pub use re_shared::ErrorResponse;
