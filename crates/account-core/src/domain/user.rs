// ============================================================================
// Account Core - User Entity
// File: crates/account-core/src/domain/user.rs
// Description: User record plus create/update request payloads
// ============================================================================

use std::borrow::Cow;

use account_shared::{new_id, utils::is_valid_mobile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Stored user record. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mobile_num: String,
    pub email: String,
    pub password_hash: String,
    pub gender: String,
    pub role: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a new record with a freshly generated id. Field values are kept
    /// exactly as validated.
    pub fn new(request: CreateUserRequest, password_hash: String) -> Self {
        Self {
            id: new_id(),
            first_name: request.first_name,
            last_name: request.last_name,
            mobile_num: request.mobile_num,
            email: request.email,
            password_hash,
            gender: request.gender,
            role: request.role,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    /// Overwrite every mutable field with the request's values, unmodified.
    pub fn apply_update(&mut self, request: &UpdateUserRequest, password_hash: String) {
        self.first_name = request.first_name.clone();
        self.last_name = request.last_name.clone();
        self.mobile_num = request.mobile_num.clone();
        self.gender = request.gender.clone();
        self.password_hash = password_hash;
        self.modified_at = Some(Utc::now());
    }
}

/// Outward-facing projection of [`User`] without credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mobile_num: String,
    pub email: String,
    pub gender: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            mobile_num: user.mobile_num,
            email: user.email,
            gender: user.gender,
            role: user.role,
            created_at: user.created_at,
            modified_at: user.modified_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub last_name: String,

    #[validate(
        length(min = 1, max = 20, message = "Mobile number must be between 1 and 20 characters"),
        custom(function = "validate_mobile_num")
    )]
    pub mobile_num: String,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 20, message = "Gender must be between 1 and 20 characters"),
        custom(function = "validate_not_blank")
    )]
    pub gender: String,

    #[validate(
        length(min = 1, max = 50, message = "Role must be between 1 and 50 characters"),
        custom(function = "validate_not_blank")
    )]
    pub role: String,
}

/// Replaces every mutable field of the user identified by `id`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub id: Uuid,

    #[validate(
        length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub last_name: String,

    #[validate(
        length(min = 1, max = 20, message = "Mobile number must be between 1 and 20 characters"),
        custom(function = "validate_mobile_num")
    )]
    pub mobile_num: String,

    #[validate(
        length(min = 1, max = 20, message = "Gender must be between 1 and 20 characters"),
        custom(function = "validate_not_blank")
    )]
    pub gender: String,

    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters"))]
    pub password: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Value must not be only whitespace")))
    } else {
        Ok(())
    }
}

fn validate_mobile_num(value: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(value) {
        Ok(())
    } else {
        Err(ValidationError::new("mobile_num")
            .with_message(Cow::Borrowed("Mobile number must contain only digits")))
    }
}
