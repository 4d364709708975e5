//! Repository traits (ports)

pub mod user_store;

pub use user_store::{StoreError, UserStore};
#[cfg(test)]
pub use user_store::MockUserStore;
