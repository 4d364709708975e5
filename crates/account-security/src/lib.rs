//! # Account Security
//! 
//! Session token signing/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{JwtService, SessionClaims};
pub use password::PasswordService;
