use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{
    AdvancedSearchRequest, AdvancedSearchResponse, CategoryCountsResponse,
    CreatePublicationRequest, MessageResponse, PublicationListResponse, PublicationQueryParams,
    PublicationResponse, ToggleAvailabilityResponse, UpdatePublicationRequest,
};
use crate::domain::{Category, Publication, SortKey};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{PublicationRepository, PublicationSearchParams};
use crate::infrastructure::reservations::ReservationsGateway;

const DEFAULT_PER_PAGE: i64 = 10;
const MAX_PER_PAGE: i64 = 50;
const ADVANCED_SEARCH_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct PublicationService {
    publication_repo: Arc<dyn PublicationRepository>,
    reservations: Arc<dyn ReservationsGateway>,
}

impl PublicationService {
    pub fn new(
        publication_repo: Arc<dyn PublicationRepository>,
        reservations: Arc<dyn ReservationsGateway>,
    ) -> Self {
        Self {
            publication_repo,
            reservations,
        }
    }

    pub async fn list(
        &self,
        params: PublicationQueryParams,
    ) -> AppResult<PublicationListResponse> {
        let page = params.page.unwrap_or(1).max(1);
        let per_page = params
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let offset = (page - 1) * per_page;

        let search = PublicationSearchParams {
            category: params.category,
            location: non_empty(params.location),
            min_price: params.min_price,
            max_price: params.max_price,
            search: non_empty(params.search),
            conditions: None,
            available_only: params.available_only.unwrap_or(false),
            sort: params.sort.unwrap_or_default(),
        };

        let total = self.publication_repo.count_search(&search).await?;
        let rows = self
            .publication_repo
            .search(&search, per_page, offset)
            .await?;

        Ok(PublicationListResponse {
            publications: rows.into_iter().map(PublicationResponse::from).collect(),
            total,
            total_pages: total_pages(total, per_page),
            page,
            per_page,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<PublicationResponse> {
        let publication = self
            .publication_repo
            .find_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(|| AppError::NotFound("publication not found".to_string()))?;

        let mut response = PublicationResponse::from(publication);
        if let Some(view_count) = self.publication_repo.increment_view_count(id).await? {
            response.view_count = view_count;
        }
        Ok(response)
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreatePublicationRequest,
    ) -> AppResult<PublicationResponse> {
        request.validate()?;
        validate_price(request.price_per_day)?;
        let deposit_required = request.deposit_required.unwrap_or(Decimal::ZERO);
        validate_deposit(deposit_required)?;

        let now = Utc::now();
        let publication = Publication {
            id: Uuid::new_v4(),
            owner_id,
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            category: request.category,
            price_per_day: request.price_per_day,
            deposit_required,
            location: request.location.trim().to_string(),
            condition: request.condition,
            is_available: true,
            is_active: true,
            images: request.images,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };

        let created = self.publication_repo.create(&publication).await?;
        info!(publication_id = %created.id, owner_id = %owner_id, "publication created");
        Ok(PublicationResponse::from(created))
    }

    pub async fn update(
        &self,
        actor_user_id: Uuid,
        publication_id: Uuid,
        request: UpdatePublicationRequest,
    ) -> AppResult<PublicationResponse> {
        request.validate()?;

        let mut existing = self.find_owned(actor_user_id, publication_id).await?;

        if let Some(title) = request.title {
            existing.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            existing.description = description.trim().to_string();
        }
        if let Some(category) = request.category {
            existing.category = category;
        }
        if let Some(price_per_day) = request.price_per_day {
            validate_price(price_per_day)?;
            existing.price_per_day = price_per_day;
        }
        if let Some(location) = request.location {
            existing.location = location.trim().to_string();
        }
        if let Some(condition) = request.condition {
            existing.condition = condition;
        }
        if let Some(images) = request.images {
            existing.images = images;
        }
        if let Some(deposit_required) = request.deposit_required {
            validate_deposit(deposit_required)?;
            existing.deposit_required = deposit_required;
        }
        if let Some(is_available) = request.is_available {
            existing.is_available = is_available;
        }

        let updated = self.publication_repo.update(&existing).await?;
        Ok(PublicationResponse::from(updated))
    }

    pub async fn toggle_availability(
        &self,
        actor_user_id: Uuid,
        publication_id: Uuid,
    ) -> AppResult<ToggleAvailabilityResponse> {
        self.find_owned(actor_user_id, publication_id).await?;

        let is_available = self
            .publication_repo
            .toggle_availability(publication_id)
            .await?
            .ok_or_else(|| AppError::NotFound("publication not found".to_string()))?;

        let status = if is_available {
            "available"
        } else {
            "unavailable"
        };
        Ok(ToggleAvailabilityResponse {
            message: format!("Publication marked as {status}"),
            is_available,
        })
    }

    pub async fn delete(
        &self,
        actor_user_id: Uuid,
        publication_id: Uuid,
    ) -> AppResult<MessageResponse> {
        self.find_owned(actor_user_id, publication_id).await?;

        if self.reservations.has_active_reservations(publication_id).await {
            return Err(AppError::BadRequest(
                "Cannot delete a publication with active reservations".to_string(),
            ));
        }

        self.publication_repo.soft_delete(publication_id).await?;
        info!(publication_id = %publication_id, actor_user_id = %actor_user_id, "publication soft-deleted");
        Ok(MessageResponse {
            message: "Publication deleted successfully".to_string(),
        })
    }

    pub async fn my_publications(
        &self,
        owner_id: Uuid,
        page: i64,
        per_page: i64,
    ) -> AppResult<PublicationListResponse> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let offset = (page - 1) * per_page;

        let total = self.publication_repo.count_by_owner(owner_id).await?;
        let rows = self
            .publication_repo
            .find_by_owner(owner_id, per_page, offset)
            .await?;

        Ok(PublicationListResponse {
            publications: rows.into_iter().map(PublicationResponse::from).collect(),
            total,
            total_pages: total_pages(total, per_page),
            page,
            per_page,
        })
    }

    pub async fn category_counts(&self) -> AppResult<CategoryCountsResponse> {
        let counts = self.publication_repo.count_by_category().await?;
        let count_for = |category: Category| counts.get(&category).copied().unwrap_or(0);

        Ok(CategoryCountsResponse {
            bricolage: count_for(Category::Bricolage),
            sport: count_for(Category::Sport),
            jardinage: count_for(Category::Jardinage),
            electromenager: count_for(Category::Electromenager),
            transport: count_for(Category::Transport),
            autre: count_for(Category::Autre),
        })
    }

    pub async fn advanced_search(
        &self,
        request: AdvancedSearchRequest,
    ) -> AppResult<AdvancedSearchResponse> {
        request.validate()?;

        let search = PublicationSearchParams {
            category: request.category,
            location: non_empty(request.location),
            min_price: request.min_price,
            max_price: request.max_price,
            search: non_empty(request.keywords),
            conditions: request.condition.filter(|c| !c.is_empty()),
            available_only: true,
            sort: SortKey::DateDesc,
        };

        let total = self.publication_repo.count_search(&search).await?;
        let rows = self
            .publication_repo
            .search(&search, ADVANCED_SEARCH_LIMIT, 0)
            .await?;

        Ok(AdvancedSearchResponse {
            publications: rows.into_iter().map(PublicationResponse::from).collect(),
            total,
        })
    }

    /// Loads the publication and enforces that the actor owns it.
    async fn find_owned(
        &self,
        actor_user_id: Uuid,
        publication_id: Uuid,
    ) -> AppResult<Publication> {
        let publication = self
            .publication_repo
            .find_by_id(publication_id)
            .await?
            .ok_or_else(|| AppError::NotFound("publication not found".to_string()))?;

        if !publication.is_owned_by(actor_user_id) {
            return Err(AppError::Forbidden(
                "You can only modify your own publications".to_string(),
            ));
        }

        Ok(publication)
    }
}

fn validate_price(price_per_day: Decimal) -> AppResult<()> {
    if price_per_day <= Decimal::ZERO {
        return Err(AppError::validation_error(
            "price_per_day must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_deposit(deposit_required: Decimal) -> AppResult<()> {
    if deposit_required < Decimal::ZERO {
        return Err(AppError::validation_error(
            "deposit_required must not be negative",
        ));
    }
    Ok(())
}

fn total_pages(total: i64, per_page: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
