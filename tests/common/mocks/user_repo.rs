use std::sync::Mutex;

use async_trait::async_trait;
use rental_backend::domain::{AuthIdentity, User};
use rental_backend::error::AppResult;
use rental_backend::infrastructure::repositories::{AuthRepository, UserRepository};
use uuid::Uuid;

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<Vec<User>>,
}

impl MockUserRepo {
    pub fn push(&self, user: User) {
        self.users.lock().expect("users mutex poisoned").push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        self.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().expect("users mutex poisoned");
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.users
            .lock()
            .expect("users mutex poisoned")
            .retain(|user| user.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAuthRepo {
    pub identities: Mutex<Vec<AuthIdentity>>,
}

#[async_trait]
impl AuthRepository for MockAuthRepo {
    async fn create_identity(&self, identity: &AuthIdentity) -> AppResult<AuthIdentity> {
        self.identities
            .lock()
            .expect("identities mutex poisoned")
            .push(identity.clone());
        Ok(identity.clone())
    }

    async fn find_identity_by_user_id(&self, user_id: Uuid) -> AppResult<Option<AuthIdentity>> {
        Ok(self
            .identities
            .lock()
            .expect("identities mutex poisoned")
            .iter()
            .find(|identity| identity.user_id == user_id)
            .cloned())
    }

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        let mut identities = self.identities.lock().expect("identities mutex poisoned");
        if let Some(identity) = identities.iter_mut().find(|i| i.user_id == user_id) {
            identity.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}
