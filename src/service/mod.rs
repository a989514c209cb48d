//! Input validation ahead of the store.

mod validation;
pub use validation::{description, rating, title, EntityValidator};
