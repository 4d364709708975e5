// ============================================================================
// Account Core - Account Service
// File: crates/account-core/src/services/account_service.rs
// ============================================================================
//! User CRUD and login with session token issuance

use std::sync::Arc;

use account_security::jwt::{JwtError, JwtService, SessionClaims};
use account_security::password::PasswordService;
use account_shared::config::AppConfig;
use account_shared::utils::mask_email;
use async_trait::async_trait;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateUserRequest, UpdateUserRequest, User, UserView};
use crate::error::DomainError;
use crate::repositories::{StoreError, UserStore};

/// Operations exposed to a transport layer.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn list(&self) -> Result<Vec<UserView>, DomainError>;
    /// Returns the generated id.
    async fn create(&self, request: CreateUserRequest) -> Result<Uuid, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<UserView, DomainError>;
    async fn update(&self, request: UpdateUserRequest) -> Result<(), DomainError>;
    async fn delete_by_id(&self, id: &Uuid) -> Result<(), DomainError>;
    /// Returns a signed session token on success.
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, DomainError>;
    fn verify_token(&self, token: &str) -> Result<SessionClaims, DomainError>;
}

pub struct UserAccountService<S: UserStore> {
    store: Arc<S>,
    jwt: JwtService,
}

impl<S: UserStore> UserAccountService<S> {
    pub fn new(store: Arc<S>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    pub fn from_config(store: Arc<S>, config: &AppConfig) -> Self {
        Self::new(store, JwtService::from_settings(&config.jwt))
    }

    fn hash_password(password: &str) -> Result<String, DomainError> {
        PasswordService::hash(password).map_err(|e| {
            error!(error = %e, "Error hashing password");
            DomainError::PasswordHashError(e.to_string())
        })
    }
}

#[async_trait]
impl<S: UserStore> AccountService for UserAccountService<S> {
    async fn list(&self) -> Result<Vec<UserView>, DomainError> {
        let users = match self.store.list_users().await {
            Ok(users) => users,
            Err(StoreError::NotExist) => {
                warn!("No users present");
                return Err(DomainError::NoUsers);
            }
            Err(e) => {
                error!(error = %e, "Error listing users");
                return Err(e.into());
            }
        };

        if users.is_empty() {
            warn!("No users present");
            return Err(DomainError::NoUsers);
        }

        Ok(users.into_iter().map(UserView::from).collect())
    }

    async fn create(&self, request: CreateUserRequest) -> Result<Uuid, DomainError> {
        if let Err(e) = request.validate() {
            warn!(email = %mask_email(&request.email), error = %e, "Invalid request for user create");
            return Err(DomainError::ValidationError(e.to_string()));
        }

        let password_hash = Self::hash_password(&request.password)?;
        let user = User::new(request, password_hash);

        if let Err(e) = self.store.create_user(&user).await {
            error!(email = %mask_email(&user.email), error = %e, "Error creating user");
            return Err(e.into());
        }

        info!(user_id = %user.id, "User created");
        Ok(user.id)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<UserView, DomainError> {
        match self.store.find_user_by_id(id).await {
            Ok(user) => Ok(user.into()),
            Err(StoreError::NotExist) => {
                warn!(user_id = %id, "No user present");
                Err(DomainError::UserNotFound)
            }
            Err(e) => {
                error!(user_id = %id, error = %e, "Error finding user");
                Err(e.into())
            }
        }
    }

    async fn update(&self, request: UpdateUserRequest) -> Result<(), DomainError> {
        if let Err(e) = request.validate() {
            warn!(user_id = %request.id, error = %e, "Invalid request for user update");
            return Err(DomainError::ValidationError(e.to_string()));
        }

        let mut user = match self.store.find_user_by_id(&request.id).await {
            Ok(user) => user,
            Err(StoreError::NotExist) => {
                warn!(user_id = %request.id, "Update failed: no user present");
                return Err(DomainError::UserNotFound);
            }
            Err(e) => {
                error!(user_id = %request.id, error = %e, "Error loading user for update");
                return Err(e.into());
            }
        };

        let password_hash = Self::hash_password(&request.password)?;
        user.apply_update(&request, password_hash);

        match self.store.update_user(&user).await {
            Ok(()) => {
                info!(user_id = %user.id, "User updated");
                Ok(())
            }
            Err(StoreError::NotExist) => {
                warn!(user_id = %user.id, "Update failed: user removed concurrently");
                Err(DomainError::UserNotFound)
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Error updating user");
                Err(e.into())
            }
        }
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), DomainError> {
        match self.store.delete_user_by_id(id).await {
            Ok(()) => {
                info!(user_id = %id, "User deleted");
                Ok(())
            }
            Err(StoreError::NotExist) => {
                warn!(user_id = %id, "User not present");
                Err(DomainError::UserNotFound)
            }
            Err(e) => {
                error!(user_id = %id, error = %e, "Error deleting user");
                Err(e.into())
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let masked = mask_email(email);

        // 1. Find user by email
        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::NotExist) => {
                warn!(email = %masked, "Login failed: no user present");
                return Err(DomainError::UserNotFound);
            }
            Err(e) => {
                error!(email = %masked, error = %e, "Error finding user by email");
                return Err(e.into());
            }
        };

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash).map_err(|e| {
            error!(user_id = %user.id, error = %e, "Stored password hash unreadable");
            DomainError::PasswordHashError(e.to_string())
        })?;

        if !password_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Sign session token
        let token = self
            .jwt
            .generate_session_token(&user.id, &user.email, &user.role)
            .map_err(|e| {
                error!(user_id = %user.id, error = %e, "Error signing session token");
                DomainError::TokenGenerationError(e.to_string())
            })?;

        info!(user_id = %user.id, "Login successful");
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<SessionClaims, DomainError> {
        self.jwt.validate_token(token).map_err(|e| {
            match &e {
                JwtError::TokenExpired => warn!("Session token expired"),
                _ => warn!(error = %e, "Session token rejected"),
            }
            DomainError::InvalidToken(e.to_string())
        })
    }
}
