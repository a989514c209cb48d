//! Catalog entities and the payloads that create or patch them.

mod actor;
mod movie;

pub use actor::*;
pub use movie::*;
