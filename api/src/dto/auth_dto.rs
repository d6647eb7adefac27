use re_core::domain::value_objects::AuthResponse;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthenticateRequest {
    /// Username, always an e-mail address
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub authorities: Vec<String>,
}

impl From<AuthResponse> for AuthenticateResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            authorities: response.authorities,
        }
    }
}

/// The authenticated caller, as resolved from their bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub authorities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_request_validation() {
        let valid = AuthenticateRequest {
            email: "a@x.com".to_string(),
            password: "password".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = AuthenticateRequest {
            email: "not-an-email".to_string(),
            password: "password".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = AuthenticateRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }
}
