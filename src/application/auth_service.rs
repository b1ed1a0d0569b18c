use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::config::AuthConfig;
use crate::domain::{AuthIdentity, User};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{AuthRepository, UserRepository};
use crate::utils::hash::{hash_password, verify_password};
use crate::utils::jwt::{create_access_token, validate_token, Claims};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    auth_repo: Arc<dyn AuthRepository>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        auth_repo: Arc<dyn AuthRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            auth_repo,
            config,
        }
    }

    /// Registers a new account. Returns the created profile; the client is
    /// expected to log in afterwards to obtain a token.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        if self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };

        let user = self.user_repo.create(&user).await?;

        let identity = AuthIdentity {
            id: Uuid::new_v4(),
            user_id: user.id,
            password_hash: hash_password(&request.password)?,
            created_at: now,
        };
        if let Err(error) = self.auth_repo.create_identity(&identity).await {
            let _ = self.user_repo.delete(user.id).await;
            return Err(error);
        }

        info!(user_id = %user.id, "user registered");
        Ok(map_user_response(&user))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let identity = self
            .auth_repo
            .find_identity_by_user_id(user.id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&request.password, &identity.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let access_token = create_access_token(user.id, &self.config)?;
        Ok(AuthResponse {
            access_token,
            user: map_user_response(&user),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(map_user_response(&user))
    }

    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        validate_token(token, &self.config)
    }
}

fn map_user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        avatar_url: user.avatar_url.clone(),
    }
}
