//! User store trait (port)

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::User;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record does not exist")]
    NotExist,

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Store failure: {0}")]
    Backend(String),
}

/// Persistence for user records. Implementations must report a missing
/// record as [`StoreError::NotExist`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn create_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_user_by_id(&self, id: &Uuid) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;
    async fn delete_user_by_id(&self, id: &Uuid) -> Result<(), StoreError>;
}
