//! HTTP handlers for the actor and movie catalog.

pub mod actors;
pub mod movies;
pub use actors::*;
pub use movies::*;

use crate::error::AppError;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}
