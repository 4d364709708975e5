//! # Account Core
//! 
//! User entity, store port and the account service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use repositories::{StoreError, UserStore};
pub use services::{AccountService, UserAccountService};
