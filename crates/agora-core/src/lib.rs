//! # Agora Core
//!
//! The domain layer of the Agora posting backend.
//! Posts, threaded comments and votes, the ports infrastructure has to
//! implement, and the services enforcing the business rules on top of them.
//! No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{CommentService, PostService, VoteService};
