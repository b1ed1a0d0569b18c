//! Typed client for the publications and user services.
//!
//! Configured with the two service base URLs; attaches the bearer token when
//! one is set and normalizes every non-2xx response into [`ApiError`]. No
//! retries, no backoff; callers decide what a failure means for them.

mod error;
mod filters;

pub use error::ApiError;
pub use filters::PublicationFilters;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::api::dtos::{
    AdvancedSearchRequest, AdvancedSearchResponse, AuthResponse, CategoryCountsResponse,
    CreatePublicationRequest, LoginRequest, MessageResponse, PublicProfileResponse,
    PublicationListResponse, PublicationResponse, RegisterRequest, ToggleAvailabilityResponse,
    UpdatePublicationRequest, UpdateUserRequest, UserProfileResponse, UserResponse,
};
use crate::config::ServicesConfig;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    publications_base: String,
    users_base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(services: &ServicesConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            publications_base: services.publications_base_url.trim_end_matches('/').to_string(),
            users_base: services.users_base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn clear_token(mut self) -> Self {
        self.token = None;
        self
    }

    // Publications service

    pub async fn list_publications(
        &self,
        filters: &PublicationFilters,
    ) -> Result<PublicationListResponse, ApiError> {
        let url = format!("{}/publications", self.publications_base);
        self.execute(self.http.request(Method::GET, url).query(&filters.to_query_pairs()))
            .await
    }

    pub async fn get_publication(&self, id: Uuid) -> Result<PublicationResponse, ApiError> {
        self.execute(self.http.get(format!("{}/publications/{id}", self.publications_base)))
            .await
    }

    pub async fn create_publication(
        &self,
        request: &CreatePublicationRequest,
    ) -> Result<PublicationResponse, ApiError> {
        self.execute_json(
            Method::POST,
            format!("{}/publications/create", self.publications_base),
            request,
        )
        .await
    }

    pub async fn update_publication(
        &self,
        id: Uuid,
        request: &UpdatePublicationRequest,
    ) -> Result<PublicationResponse, ApiError> {
        self.execute_json(
            Method::PUT,
            format!("{}/publications/{id}/update", self.publications_base),
            request,
        )
        .await
    }

    pub async fn toggle_availability(
        &self,
        id: Uuid,
    ) -> Result<ToggleAvailabilityResponse, ApiError> {
        let url = format!(
            "{}/publications/{id}/toggle-availability",
            self.publications_base
        );
        self.execute(self.http.request(Method::PUT, url)).await
    }

    pub async fn delete_publication(&self, id: Uuid) -> Result<MessageResponse, ApiError> {
        let url = format!("{}/publications/{id}/delete", self.publications_base);
        self.execute(self.http.request(Method::DELETE, url)).await
    }

    pub async fn my_publications(
        &self,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<PublicationListResponse, ApiError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = per_page {
            pairs.push(("per_page", per_page.to_string()));
        }

        let url = format!("{}/publications/user", self.publications_base);
        self.execute(self.http.get(url).query(&pairs)).await
    }

    pub async fn category_counts(&self) -> Result<CategoryCountsResponse, ApiError> {
        self.execute(
            self.http
                .get(format!("{}/publications/categories", self.publications_base)),
        )
        .await
    }

    pub async fn advanced_search(
        &self,
        request: &AdvancedSearchRequest,
    ) -> Result<AdvancedSearchResponse, ApiError> {
        self.execute_json(
            Method::POST,
            format!("{}/publications/search/advanced", self.publications_base),
            request,
        )
        .await
    }

    // User service

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ApiError> {
        self.execute_json(
            Method::POST,
            format!("{}/users/register", self.users_base),
            request,
        )
        .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.execute_json(Method::POST, format!("{}/users/login", self.users_base), request)
            .await
    }

    pub async fn me(&self) -> Result<UserResponse, ApiError> {
        self.execute(self.http.get(format!("{}/users/me", self.users_base)))
            .await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        request: &UpdateUserRequest,
    ) -> Result<UserProfileResponse, ApiError> {
        self.execute_json(
            Method::PUT,
            format!("{}/users/update/{id}", self.users_base),
            request,
        )
        .await
    }

    pub async fn get_user_profile(&self, id: Uuid) -> Result<PublicProfileResponse, ApiError> {
        self.execute(self.http.get(format!("{}/users/{id}", self.users_base)))
            .await
    }

    async fn execute_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.request(method, url).json(body)).await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}
