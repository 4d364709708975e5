//! In-process store adapters

pub mod user_store;

pub use user_store::InMemoryUserStore;
