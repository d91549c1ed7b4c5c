//! # Agora Shared
//!
//! Wire types of the Agora HTTP API. Kept free of server dependencies so
//! clients can reuse them.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
