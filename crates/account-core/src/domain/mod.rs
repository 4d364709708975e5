//! # Account Core - Domain Module

pub mod user;

pub use user::{CreateUserRequest, UpdateUserRequest, User, UserView};
