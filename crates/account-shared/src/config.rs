//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::constants::{DEFAULT_ACCESS_TOKEN_EXPIRY, DEFAULT_LOG_LEVEL, MIN_SECRET_LENGTH};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub jwt: JwtSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Session token lifetime in seconds.
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl AppConfig {
    /// Load `.env`, then layer defaults, `config/default`, `config/{APP_ENV}`
    /// and `SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        debug!(env = %env, "Configuration sources loaded");
        Self::from_config(config)
    }

    /// Builder pre-populated with every default. `jwt.secret` has none.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "account-service")?
            .set_default("jwt.access_token_expiry", DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .set_default("log.json", true)
    }

    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let actual = self.jwt.secret.len();
        if actual < MIN_SECRET_LENGTH {
            return Err(AppError::InsecureSecret {
                min: MIN_SECRET_LENGTH,
                actual,
            });
        }
        if self.jwt.access_token_expiry <= 0 {
            return Err(AppError::InternalError(format!(
                "jwt.access_token_expiry must be positive, got {}",
                self.jwt.access_token_expiry
            )));
        }
        Ok(())
    }
}
