//! SeaORM entities, one module per table.

pub mod comment;
pub mod post;
pub mod user;
pub mod vote;
