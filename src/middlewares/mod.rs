pub mod auth;
pub mod cors;

pub use auth::{AdminAuthMiddleware, AdminIdentity};
pub use cors::create_cors;
