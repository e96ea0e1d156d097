use crate::models::User;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("user {0} already exists")]
    AlreadyExists(String),
}

#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(UserStoreError::AlreadyExists(user.username));
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    pub async fn find(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }
}
