use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

/// Accounts keyed by e-mail, for the `memory` storage backend.
#[derive(Default)]
pub struct MemoryUserGateway {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserWriter for MemoryUserGateway {
    async fn insert(&self, user: User) -> AppResult<Id<User>> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::UserAlreadyExists);
        }
        let id = user.id.clone();
        users.insert(user.email.clone(), user);
        Ok(id)
    }
}

#[async_trait]
impl UserReader for MemoryUserGateway {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.users.read().await.contains_key(email))
    }
}
