//! Database connection management and SeaORM repositories.

mod connections;

#[cfg(feature = "postgres")]
mod comments;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;
#[cfg(feature = "postgres")]
mod votes;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use comments::PostgresCommentRepository;
#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostRepository, PostgresUserRepository};
#[cfg(feature = "postgres")]
pub use votes::PostgresVoteRepository;
