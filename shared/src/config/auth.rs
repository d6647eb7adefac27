//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{ConfigError, Environment};

/// Default token lifetime in seconds (24 hours)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Longest token lifetime accepted (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 86_400;

/// Minimum secret length accepted in production (256 bits for HS256)
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key used as the HMAC key for every issued token
    pub secret: String,

    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,

    /// Algorithm for JWT signing (only HS256 is supported)
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check the settings before the token service is built
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "jwt.secret".to_string(),
            });
        }
        if environment.is_production() && self.secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "jwt.secret".to_string(),
                reason: format!(
                    "must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                ),
            });
        }
        if self.token_ttl_seconds <= 0 {
            return Err(ConfigError::Invalid {
                name: "jwt.token_ttl_seconds".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                name: "jwt.token_ttl_seconds".to_string(),
                reason: format!("must not exceed {} seconds", MAX_TOKEN_TTL_SECONDS),
            });
        }
        if !self.algorithm.eq_ignore_ascii_case("HS256") {
            return Err(ConfigError::Invalid {
                name: "jwt.algorithm".to_string(),
                reason: format!("unsupported algorithm {}", self.algorithm),
            });
        }
        Ok(())
    }
}

/// Password encoding strategy used to check credentials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordEncoderKind {
    /// Passwords are stored and compared as plain text
    #[default]
    Noop,
    /// Passwords are stored as bcrypt hashes
    Bcrypt,
}

impl std::str::FromStr for PasswordEncoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noop" | "plain" | "plaintext" => Ok(PasswordEncoderKind::Noop),
            "bcrypt" => Ok(PasswordEncoderKind::Bcrypt),
            _ => Err(format!("Invalid password encoder: {}", s)),
        }
    }
}

/// A user loaded into the in-memory credential store at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSeed {
    /// Username (e-mail address)
    pub username: String,

    /// Raw password, encoded with the configured encoder when seeded
    pub password: String,

    /// Granted authorities such as `ROLE_USER`
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl UserSeed {
    pub fn new(username: impl Into<String>, password: impl Into<String>, authorities: &[&str]) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password encoding strategy
    pub password_encoder: PasswordEncoderKind,

    /// Users seeded into the credential store
    pub users: Vec<UserSeed>,
}

impl AuthConfig {
    /// Apply the flat environment variables on top of the loaded settings
    ///
    /// `JWT_SECRET`, `JWT_TOKEN_TTL_SECONDS` and `AUTH_PASSWORD_ENCODER` win
    /// over file and prefixed sources. Unparseable values are reported.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Ok(ttl) = std::env::var("JWT_TOKEN_TTL_SECONDS") {
            self.jwt.token_ttl_seconds = ttl.parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_TOKEN_TTL_SECONDS".to_string(),
                reason: format!("not an integer: {}", ttl),
            })?;
        }
        if let Ok(kind) = std::env::var("AUTH_PASSWORD_ENCODER") {
            self.password_encoder = kind.parse().map_err(|reason| ConfigError::Invalid {
                name: "AUTH_PASSWORD_ENCODER".to_string(),
                reason,
            })?;
        }
        Ok(())
    }

    /// Demo users used when no users are configured in development
    pub fn demo_users() -> Vec<UserSeed> {
        vec![
            UserSeed::new("admin@example.com", "password", &["ROLE_ADMIN"]),
            UserSeed::new("user@example.com", "password", &["ROLE_USER"]),
        ]
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.token_ttl_seconds, 86_400);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.secret.is_empty());
    }

    #[test]
    fn test_jwt_config_new_keeps_default_ttl() {
        let config = JwtConfig::new("my-secret");
        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        let config = JwtConfig::new("   ");
        assert!(matches!(
            config.validate(Environment::Development),
            Err(ConfigError::Missing { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_short_secret_in_production() {
        let config = JwtConfig::new("short");
        assert!(config.validate(Environment::Development).is_ok());
        assert!(matches!(
            config.validate(Environment::Production),
            Err(ConfigError::Invalid { .. })
        ));

        let config = JwtConfig::new("x".repeat(MIN_PRODUCTION_SECRET_LEN));
        assert!(config.validate(Environment::Production).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut config = JwtConfig::new("secret");
        config.token_ttl_seconds = 0;
        assert!(config.validate(Environment::Development).is_err());
    }

    #[test]
    fn test_validate_rejects_ttl_above_maximum() {
        let mut config = JwtConfig::new("secret");
        config.token_ttl_seconds = 10_000_000_000_000;
        assert_eq!(
            config.validate(Environment::Development),
            Err(ConfigError::Invalid {
                name: "jwt.token_ttl_seconds".to_string(),
                reason: format!("must not exceed {} seconds", MAX_TOKEN_TTL_SECONDS),
            })
        );

        config.token_ttl_seconds = MAX_TOKEN_TTL_SECONDS;
        assert!(config.validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_validate_rejects_other_algorithms() {
        let mut config = JwtConfig::new("secret");
        config.algorithm = "RS256".to_string();
        assert!(config.validate(Environment::Development).is_err());

        config.algorithm = "hs256".to_string();
        assert!(config.validate(Environment::Development).is_ok());
    }

    #[test]
    fn test_password_encoder_kind_parsing() {
        assert_eq!("bcrypt".parse::<PasswordEncoderKind>(), Ok(PasswordEncoderKind::Bcrypt));
        assert_eq!("NOOP".parse::<PasswordEncoderKind>(), Ok(PasswordEncoderKind::Noop));
        assert!("argon2".parse::<PasswordEncoderKind>().is_err());
    }

    #[test]
    fn test_auth_config_deserializes_users() {
        let json = serde_json::json!({
            "jwt": { "secret": "s3cret", "token_ttl_seconds": 60 },
            "password_encoder": "bcrypt",
            "users": [
                { "username": "a@x.com", "password": "pw", "authorities": ["ROLE_USER"] }
            ]
        });
        let config: AuthConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.jwt.token_ttl_seconds, 60);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.password_encoder, PasswordEncoderKind::Bcrypt);
        assert_eq!(config.users, vec![UserSeed::new("a@x.com", "pw", &["ROLE_USER"])]);
    }
}
