use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    AdvancedSearchRequest, CreatePublicationRequest, PaginationParams, PublicationQueryParams,
    UpdatePublicationRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments are registered before the `{id}` captures.
    cfg.service(
        web::scope("/publications")
            .route("", web::get().to(list_publications))
            .route("/user", web::get().to(my_publications))
            .route("/categories", web::get().to(category_counts))
            .route("/search/advanced", web::post().to(advanced_search))
            .route("/create", web::post().to(create_publication))
            .route("/{id}", web::get().to(get_publication))
            .route("/{id}/update", web::put().to(update_publication))
            .route(
                "/{id}/toggle-availability",
                web::put().to(toggle_availability),
            )
            .route("/{id}/delete", web::delete().to(delete_publication)),
    );
}

async fn list_publications(
    state: web::Data<AppState>,
    query: web::Query<PublicationQueryParams>,
) -> AppResult<HttpResponse> {
    let result = state.publication_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn get_publication(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .get_by_id(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn create_publication(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreatePublicationRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .create(auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

async fn update_publication(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdatePublicationRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .update(auth.user_id, path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn toggle_availability(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .toggle_availability(auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn delete_publication(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .delete(auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn my_publications(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<PaginationParams>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .my_publications(auth.user_id, query.page, query.per_page)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn category_counts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.publication_service.category_counts().await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn advanced_search(
    state: web::Data<AppState>,
    payload: web::Json<AdvancedSearchRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .publication_service
        .advanced_search(payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
