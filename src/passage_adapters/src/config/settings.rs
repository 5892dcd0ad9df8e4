use std::time::Duration;

use config::{Config, Environment, File};
use passage_application::TokenLifetimes;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use crate::config::constants::{defaults, env, prod};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{} must be set to a non-empty value", env::JWT_SECRET_ENV_VAR)]
    MissingJwtSecret,
    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassageSettings {
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
    pub password: Option<Secret<String>>,
    pub db: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub auth_address: String,
    pub account_address: String,
    pub request_timeout_millis: u64,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl PassageSettings {
    /// Loads `.env`, then `config/base.json` and `config/<APP_ENVIRONMENT>.json`
    /// when present, then `PASSAGE__SECTION__KEY` variables, then the plain
    /// `JWT_SECRET` / `DATABASE_URL` / `REDIS_*` variables.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var(env::APP_ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| "local".to_string());

        let config = Self::defaults()?
            .add_source(File::with_name(&format!("{}/base", defaults::CONFIG_DIR)).required(false))
            .add_source(
                File::with_name(&format!("{}/{environment}", defaults::CONFIG_DIR)).required(false),
            )
            .add_source(
                Environment::with_prefix(env::SETTINGS_ENV_PREFIX)
                    .prefix_separator(env::SETTINGS_ENV_SEPARATOR)
                    .separator(env::SETTINGS_ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            )
            .set_override_option("auth.jwt_secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "redis.host_name",
                std::env::var(env::REDIS_HOST_NAME_ENV_VAR).ok(),
            )?
            .set_override_option(
                "redis.password",
                std::env::var(env::REDIS_PASSWORD_ENV_VAR).ok(),
            )?
            .build()?;

        Self::from_config(config)
    }

    /// Builder pre-filled with every default, so only the secret is mandatory.
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.access_token_ttl_secs", defaults::ACCESS_TOKEN_TTL_SECS)?
            .set_default("auth.refresh_token_ttl_secs", defaults::REFRESH_TOKEN_TTL_SECS)?
            .set_default("postgres.url", "")?
            .set_default("redis.host_name", defaults::REDIS_HOST_NAME)?
            .set_default("redis.db", defaults::REDIS_DB)?
            .set_default("server.auth_address", prod::AUTH_ADDRESS)?
            .set_default("server.account_address", prod::ACCOUNT_ADDRESS)?
            .set_default("server.request_timeout_millis", defaults::REQUEST_TIMEOUT_MILLIS)?
            .set_default("server.allowed_origins", Vec::<String>::new())?)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: PassageSettings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.auth.jwt_secret.expose_secret().trim().is_empty() {
            return Err(SettingsError::MissingJwtSecret);
        }
        if self.postgres.url.expose_secret().trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "postgres.url",
                reason: format!("{} must be set to a non-empty value", env::DATABASE_URL_ENV_VAR),
            });
        }
        if self.auth.access_token_ttl_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "auth.access_token_ttl_secs",
                reason: "must be positive".to_string(),
            });
        }
        if self.auth.refresh_token_ttl_secs <= self.auth.access_token_ttl_secs {
            return Err(SettingsError::Invalid {
                key: "auth.refresh_token_ttl_secs",
                reason: "must be longer than the access token ttl".to_string(),
            });
        }
        if self.server.request_timeout_millis == 0 {
            return Err(SettingsError::Invalid {
                key: "server.request_timeout_millis",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl AuthSettings {
    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            access_token_ttl: Duration::from_secs(self.access_token_ttl_secs),
            refresh_token_ttl: Duration::from_secs(self.refresh_token_ttl_secs),
        }
    }
}

impl RedisSettings {
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}/{}",
                password.expose_secret(),
                self.host_name,
                self.db
            ),
            None => format!("redis://{}/{}", self.host_name, self.db),
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_millis)
    }
}
