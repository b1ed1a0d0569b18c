use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::{web, App, HttpServer};
use rental_backend::api::{openapi, routes};
use rental_backend::application::{AuthService, PublicationService, UserService};
use rental_backend::config::AppConfig;
use rental_backend::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use rental_backend::infrastructure::repositories::{
    AuthRepositoryImpl, PublicationRepositoryImpl, UserRepositoryImpl,
};
use rental_backend::infrastructure::reservations::{
    DisabledReservationsClient, HttpReservationsClient, ReservationsGateway,
};
use rental_backend::middleware::request_logging::{
    get_client_ip, get_status_class, get_user_agent,
};
use rental_backend::observability::error_tracking::capture_unexpected_5xx;
use rental_backend::observability::AppMetrics;
use rental_backend::security::{cors_middleware, security_headers};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("failed to load application configuration");
    config
        .validate()
        .expect("application configuration is invalid");

    let registry = tracing_subscriber::registry().with(EnvFilter::new(config.logging.level.clone()));
    if config.logging.json_format {
        registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(true))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }

    let pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");

    run_migrations(&pool)
        .await
        .expect("database migrations failed");

    let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));
    let auth_repo = Arc::new(AuthRepositoryImpl::new(pool.clone()));
    let publication_repo = Arc::new(PublicationRepositoryImpl::new(pool.clone()));

    let reservations: Arc<dyn ReservationsGateway> =
        match config.services.reservations_base_url.clone() {
            Some(base_url) => Arc::new(HttpReservationsClient::new(base_url)),
            None => Arc::new(DisabledReservationsClient),
        };

    let state = routes::AppState {
        auth_service: Arc::new(AuthService::new(
            user_repo.clone(),
            auth_repo.clone(),
            config.auth.clone(),
        )),
        user_service: Arc::new(UserService::new(user_repo.clone(), auth_repo)),
        publication_service: Arc::new(PublicationService::new(publication_repo, reservations)),
        security: config.security.clone(),
        app_environment: config.app.environment.clone(),
        metrics: Arc::new(AppMetrics::default()),
        db_pool: pool.clone(),
    };

    let bind_host = config.app.host.clone();
    let bind_port = config.app.port;
    let security_config = config.security.clone();
    let auth_config = config.auth.clone();
    let metrics = state.metrics.clone();

    info!(host = %bind_host, port = bind_port, environment = %state.app_environment, "starting server");

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                let request_id = Uuid::new_v4().to_string();
                let path = req.path().to_string();
                let method = req.method().to_string();
                let client_ip = get_client_ip(&req);
                let user_agent = get_user_agent(&req);
                let metrics = metrics.clone();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    match fut.await {
                        Ok(mut response) => {
                            response.headers_mut().insert(
                                actix_web::http::header::HeaderName::from_static("x-request-id"),
                                actix_web::http::header::HeaderValue::from_str(&request_id)
                                    .unwrap_or_else(|_| {
                                        actix_web::http::header::HeaderValue::from_static(
                                            "invalid-request-id",
                                        )
                                    }),
                            );

                            let status = response.status().as_u16();
                            let latency_ms = start.elapsed().as_millis() as u64;
                            metrics.record_request(status, latency_ms);

                            info!(
                                request_id = %request_id,
                                method = %method,
                                path = %path,
                                status = status,
                                status_class = get_status_class(status),
                                latency_ms = latency_ms,
                                client_ip = %client_ip,
                                user_agent = %user_agent,
                                "request completed"
                            );

                            if status >= 500 {
                                capture_unexpected_5xx(&path, &method, status, &request_id);
                            }
                            Ok(response)
                        }
                        Err(error) => Err(error),
                    }
                }
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(auth_config.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
            .configure(routes::configure)
            .configure(openapi::configure_swagger_ui)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
