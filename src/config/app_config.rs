use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("auth configuration is invalid: {0}")]
    AuthConfig(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
    pub services: ServicesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_jwt_kid")]
    pub jwt_kid: String,
    #[serde(default)]
    pub previous_jwt_secrets: Vec<String>,
    #[serde(default)]
    pub previous_jwt_kids: Vec<String>,
    pub jwt_expiration_seconds: u64,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
    #[serde(default)]
    pub metrics_admin_token: Option<String>,
}

/// Base URLs of the deployed services. The publications and users URLs are
/// what the API client is pointed at; the reservations URL, when present,
/// enables the pre-delete active-reservation probe.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    #[serde(default = "default_publications_base_url")]
    pub publications_base_url: String,
    #[serde(default = "default_users_base_url")]
    pub users_base_url: String,
    #[serde(default)]
    pub reservations_base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/development.toml").nested())
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::prefixed("DATABASE_").split("__"))
            .merge(Env::prefixed("AUTH_").split("__"))
            .merge(Env::prefixed("SECURITY_").split("__"))
            .merge(Env::prefixed("SERVICES_").split("__"))
            .merge(Env::prefixed("LOGGING_").split("__"))
            .merge(
                Env::raw()
                    .only(&["database.url"])
                    .map(|_| "DATABASE_URL".into()),
            )
            .merge(
                Env::raw()
                    .only(&["auth.jwt_secret"])
                    .map(|_| "JWT_SECRET".into()),
            )
            .merge(
                Env::raw()
                    .only(&["services.publications_base_url"])
                    .map(|_| "PUBLICATIONS_SERVICE_URL".into()),
            )
            .merge(
                Env::raw()
                    .only(&["services.users_base_url"])
                    .map(|_| "USER_SERVICE_URL".into()),
            )
            .extract()
            .map_err(Box::new)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::AuthConfig(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }
        if self.auth.previous_jwt_kids.len() != self.auth.previous_jwt_secrets.len() {
            return Err(ConfigError::AuthConfig(
                "previous_jwt_kids and previous_jwt_secrets must have the same length".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_jwt_kid() -> String {
    "v1".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_metrics_allow_private_only() -> bool {
    true
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_publications_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_users_base_url() -> String {
    "http://localhost:8080".to_string()
}
