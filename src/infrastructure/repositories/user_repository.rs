use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::{AuthRepository, UserRepository};
use crate::domain::{AuthIdentity, User};
use crate::error::AppResult;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, avatar_url, created_at, updated_at";

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, first_name, last_name, email, avatar_url, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET first_name = $2, last_name = $3, email = $4, avatar_url = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct AuthRepositoryImpl {
    pool: PgPool,
}

impl AuthRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn create_identity(&self, identity: &AuthIdentity) -> AppResult<AuthIdentity> {
        let created = sqlx::query_as::<_, AuthIdentity>(
            "INSERT INTO auth_identities (id, user_id, password_hash, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id, user_id, password_hash, created_at",
        )
        .bind(identity.id)
        .bind(identity.user_id)
        .bind(&identity.password_hash)
        .bind(identity.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_identity_by_user_id(&self, user_id: Uuid) -> AppResult<Option<AuthIdentity>> {
        let identity = sqlx::query_as::<_, AuthIdentity>(
            "SELECT id, user_id, password_hash, created_at FROM auth_identities \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(identity)
    }

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE auth_identities SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
