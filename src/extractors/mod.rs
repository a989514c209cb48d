pub mod auth;
pub mod json;

pub use auth::Authorized;
pub use json::ApiJson;
