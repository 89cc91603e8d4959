pub mod auth;
pub mod owner;

pub use auth::{bearer_auth_middleware, AuthUser};
pub use owner::verify_owner;
