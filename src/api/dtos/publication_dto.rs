use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Category, Condition, Publication, SortKey};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePublicationRequest {
    #[validate(length(min = 3, max = 200, message = "title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,

    pub category: Category,

    pub price_per_day: Decimal,

    #[validate(length(min = 2, max = 200, message = "location must be 2-200 characters"))]
    pub location: String,

    pub condition: Condition,

    #[serde(default)]
    pub images: Vec<String>,

    pub deposit_required: Option<Decimal>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePublicationRequest {
    #[validate(length(min = 3, max = 200, message = "title must be 3-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,
    pub category: Option<Category>,
    pub price_per_day: Option<Decimal>,
    #[validate(length(min = 2, max = 200, message = "location must be 2-200 characters"))]
    pub location: Option<String>,
    pub condition: Option<Condition>,
    pub images: Option<Vec<String>>,
    pub deposit_required: Option<Decimal>,
    pub is_available: Option<bool>,
}

/// Query parameters of the public listing endpoint. Out-of-range `page` and
/// `per_page` values are accepted and clamped service-side.
#[derive(Debug, Default, Deserialize)]
pub struct PublicationQueryParams {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub available_only: Option<bool>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdvancedSearchRequest {
    pub keywords: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub condition: Option<Vec<Condition>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicationResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price_per_day: Decimal,
    pub deposit_required: Decimal,
    pub location: String,
    pub condition: Condition,
    pub is_available: bool,
    pub is_active: bool,
    pub images: Vec<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Publication> for PublicationResponse {
    fn from(publication: Publication) -> Self {
        Self {
            id: publication.id,
            owner_id: publication.owner_id,
            title: publication.title,
            description: publication.description,
            category: publication.category,
            price_per_day: publication.price_per_day,
            deposit_required: publication.deposit_required,
            location: publication.location,
            condition: publication.condition,
            is_available: publication.is_available,
            is_active: publication.is_active,
            images: publication.images,
            view_count: publication.view_count,
            created_at: publication.created_at,
            updated_at: publication.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicationListResponse {
    pub publications: Vec<PublicationResponse>,
    pub total: i64,
    pub total_pages: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdvancedSearchResponse {
    pub publications: Vec<PublicationResponse>,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleAvailabilityResponse {
    pub message: String,
    pub is_available: bool,
}

/// Per-category counts of active, available publications. Every category is
/// always present so the UI can render a stable facet list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountsResponse {
    pub bricolage: i64,
    pub sport: i64,
    pub jardinage: i64,
    pub electromenager: i64,
    pub transport: i64,
    pub autre: i64,
}
