pub mod models;
pub mod permissions;

pub use models::{ProfileFields, User};
pub use permissions::{Permission, UserRole};
