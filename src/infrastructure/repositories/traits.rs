use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{AuthIdentity, Category, Condition, Publication, SortKey, User};
use crate::error::AppResult;

/// Filters applied to the public listing queries. Soft-deleted rows are
/// always excluded; `available_only` additionally hides unavailable ones.
#[derive(Debug, Clone, Default)]
pub struct PublicationSearchParams {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub conditions: Option<Vec<Condition>>,
    pub available_only: bool,
    pub sort: SortKey,
}

#[async_trait]
pub trait PublicationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Publication>>;
    async fn search(
        &self,
        params: &PublicationSearchParams,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>>;
    async fn count_search(&self, params: &PublicationSearchParams) -> AppResult<i64>;
    async fn find_by_owner(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Publication>>;
    async fn count_by_owner(&self, owner_id: Uuid) -> AppResult<i64>;
    async fn create(&self, publication: &Publication) -> AppResult<Publication>;
    async fn update(&self, publication: &Publication) -> AppResult<Publication>;
    /// Flips `is_available` in a single statement and returns the new value,
    /// or `None` when the row does not exist.
    async fn toggle_availability(&self, id: Uuid) -> AppResult<Option<bool>>;
    /// Marks the row inactive and unavailable; keeps it for the owner view.
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;
    /// Bumps the view counter and returns the new value, or `None` when the
    /// row does not exist.
    async fn increment_view_count(&self, id: Uuid) -> AppResult<Option<i64>>;
    /// Counts of active+available rows grouped by category. Categories with
    /// no rows are absent from the map.
    async fn count_by_category(&self) -> AppResult<HashMap<Category, i64>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<User>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_identity(&self, identity: &AuthIdentity) -> AppResult<AuthIdentity>;
    async fn find_identity_by_user_id(&self, user_id: Uuid) -> AppResult<Option<AuthIdentity>>;
    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()>;
}
