use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::routes::health, crate::api::routes::ready),
    components(
        schemas(
            crate::api::dtos::common::ErrorResponse,
            crate::api::dtos::common::MessageResponse,
            crate::api::dtos::publication_dto::CreatePublicationRequest,
            crate::api::dtos::publication_dto::UpdatePublicationRequest,
            crate::api::dtos::publication_dto::AdvancedSearchRequest,
            crate::api::dtos::publication_dto::PublicationResponse,
            crate::api::dtos::publication_dto::PublicationListResponse,
            crate::api::dtos::publication_dto::AdvancedSearchResponse,
            crate::api::dtos::publication_dto::ToggleAvailabilityResponse,
            crate::api::dtos::publication_dto::CategoryCountsResponse,
            crate::api::dtos::auth_dto::RegisterRequest,
            crate::api::dtos::auth_dto::LoginRequest,
            crate::api::dtos::auth_dto::AuthResponse,
            crate::api::dtos::auth_dto::UserResponse,
            crate::api::dtos::user_dto::UpdateUserRequest,
            crate::api::dtos::user_dto::UserProfileResponse,
            crate::api::dtos::user_dto::PublicProfileResponse,
        )
    ),
    tags(
        (name = "publications", description = "Rental listing management and search"),
        (name = "users", description = "Registration, login and profiles"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Rental Backend API",
        version = "0.1.0",
        description = "Peer-to-peer equipment rental marketplace backend API",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
