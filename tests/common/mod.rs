#![allow(dead_code)]

use std::sync::Arc;

use rental_backend::api::routes::AppState;
use rental_backend::application::{AuthService, PublicationService, UserService};
use rental_backend::config::{AuthConfig, SecurityConfig};
use rental_backend::observability::AppMetrics;
use sqlx::postgres::PgPoolOptions;

pub mod fixtures;
pub mod mocks;

use self::mocks::{MockAuthRepo, MockPublicationRepo, MockUserRepo, StubReservations};

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        jwt_kid: "v1".to_string(),
        previous_jwt_secrets: Vec::new(),
        previous_jwt_kids: Vec::new(),
        jwt_expiration_seconds: 900,
        issuer: "rental-backend-test".to_string(),
        audience: "rental-client".to_string(),
    }
}

pub fn test_security_config() -> SecurityConfig {
    SecurityConfig {
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        metrics_allow_private_only: true,
        metrics_admin_token: None,
    }
}

/// Mock-backed application state for route tests. The pool is lazy and never
/// actually connected; only `/ready` would touch it.
pub fn test_app_state(
    user_repo: Arc<MockUserRepo>,
    auth_repo: Arc<MockAuthRepo>,
    publication_repo: Arc<MockPublicationRepo>,
) -> AppState {
    let db_pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost/rental_test")
        .expect("lazy pool should build");

    AppState {
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            auth_repo.clone(),
            test_auth_config(),
        )),
        user_service: Arc::new(UserService::new(user_repo, auth_repo)),
        publication_service: Arc::new(PublicationService::new(
            publication_repo,
            Arc::new(StubReservations::none()),
        )),
        security: test_security_config(),
        app_environment: "test".to_string(),
        metrics: Arc::new(AppMetrics::default()),
        db_pool,
    }
}
