use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{LoginRequest, RegisterRequest, UpdateUserRequest};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me))
            .route("/update/{id}", web::put().to(update_user))
            .route("/{id}", web::get().to(get_user_profile)),
    );
}

async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn me(state: web::Data<AppState>, auth: AuthenticatedUser) -> AppResult<HttpResponse> {
    let result = state.auth_service.me(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn update_user(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .user_service
        .update_profile(auth.user_id, path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn get_user_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .user_service
        .get_public_profile(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
