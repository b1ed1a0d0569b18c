use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{PublicProfileResponse, UpdateUserRequest, UserProfileResponse};
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{AuthRepository, UserRepository};
use crate::utils::hash::hash_password;

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    auth_repo: Arc<dyn AuthRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, auth_repo: Arc<dyn AuthRepository>) -> Self {
        Self {
            user_repo,
            auth_repo,
        }
    }

    pub async fn get_public_profile(&self, id: Uuid) -> AppResult<PublicProfileResponse> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(PublicProfileResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> AppResult<UserProfileResponse> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        Ok(map_profile(user))
    }

    pub async fn update_profile(
        &self,
        actor_user_id: Uuid,
        target_user_id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<UserProfileResponse> {
        request.validate()?;

        if actor_user_id != target_user_id {
            return Err(AppError::Forbidden(
                "You can only modify your own profile".to_string(),
            ));
        }

        let mut user = self
            .user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(email) = request.email {
            if email != user.email {
                if self.user_repo.find_by_email(&email).await?.is_some() {
                    return Err(AppError::Conflict("email already registered".to_string()));
                }
                user.email = email;
            }
        }
        if let Some(avatar_url) = request.avatar_url {
            user.avatar_url = Some(avatar_url);
        }

        if let Some(password) = request.password {
            let password_hash = hash_password(&password)?;
            self.auth_repo
                .update_password_hash(user.id, &password_hash)
                .await?;
        }

        let updated = self.user_repo.update(&user).await?;
        Ok(map_profile(updated))
    }
}

fn map_profile(user: User) -> UserProfileResponse {
    UserProfileResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        avatar_url: user.avatar_url,
        created_at: user.created_at,
    }
}
