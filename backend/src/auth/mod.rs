//! Authentication module
//!
//! JWT-style bearer tokens with argon2 password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, TokenService};
pub use middleware::AuthUser;
pub use password::PasswordService;
