//! Startup configuration loading
//!
//! Sources, lowest precedence first:
//! 1. `config/default.{toml,yaml,json}`
//! 2. `config/<environment>.{toml,yaml,json}`
//! 3. `APP__`-prefixed variables, e.g. `APP__AUTH__JWT__SECRET`
//! 4. Flat variables: `JWT_SECRET`, `JWT_TOKEN_TTL_SECONDS`,
//!    `AUTH_PASSWORD_ENCODER`, `SERVER_HOST`, `SERVER_PORT`
//!
//! A `.env` file in the working directory is read first. The log level
//! defaults per environment and `RUST_LOG` still overrides it.

use anyhow::Context;
use config::{Config, File};
use re_shared::{AppConfig, AuthConfig, Environment, LoggingConfig};

/// Load and validate the application configuration
pub fn load() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let settings = Config::builder()
        .set_default(
            "logging.level",
            LoggingConfig::for_environment(environment).level,
        )?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&environment.config_file()).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()
        .context("Failed to read configuration sources")?;

    let mut app_config = from_settings(settings)?;
    app_config.environment = environment;
    app_config.auth.apply_env()?;
    app_config.server.apply_env()?;

    finalize(app_config)
}

/// Deserialize already-built settings; missing sections take their defaults
pub fn from_settings(settings: Config) -> anyhow::Result<AppConfig> {
    settings
        .try_deserialize::<AppConfig>()
        .context("Failed to deserialize configuration")
}

/// Fill development defaults and validate
pub fn finalize(mut app_config: AppConfig) -> anyhow::Result<AppConfig> {
    if app_config.auth.users.is_empty() && app_config.environment.is_development() {
        log::warn!("No users configured, seeding demo users");
        app_config.auth.users = AuthConfig::demo_users();
    }

    app_config
        .validate()
        .context("Invalid configuration")?;

    Ok(app_config)
}
