//! # Account Infrastructure
//! 
//! Store implementations (adapters).

pub mod memory;

pub use memory::InMemoryUserStore;
