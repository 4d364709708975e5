//! Domain services (business logic)

pub mod account_service;

pub use account_service::{AccountService, UserAccountService};
