mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, SecurityConfig,
    ServerConfig, ServicesConfig,
};
