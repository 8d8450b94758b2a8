//! Business logic layer

mod user;

pub use user::UserService;
