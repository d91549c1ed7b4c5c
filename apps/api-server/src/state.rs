//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ports::{CommentRepository, PostRepository, UserRepository, VoteRepository};
use agora_core::{CommentService, PostService, VoteService};
use agora_infra::{DatabaseConfig, InMemoryDatabase};

#[cfg(feature = "postgres")]
use agora_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    PostgresVoteRepository, connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: PostService,
    pub comments: CommentService,
    pub votes: VoteService,
}

impl AppState {
    /// Build the state on PostgreSQL when configured and reachable, and on
    /// the in-memory store otherwise.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match connect(config).await {
                    Ok(conn) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::from_repositories(
                            Arc::new(PostgresUserRepository::new(conn.clone())),
                            Arc::new(PostgresPostRepository::new(conn.clone())),
                            Arc::new(PostgresCommentRepository::new(conn.clone())),
                            Arc::new(PostgresVoteRepository::new(conn)),
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("Built without the postgres feature; ignoring DATABASE_URL");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory()
    }

    pub fn in_memory() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        Self::from_repositories(db.clone(), db.clone(), db.clone(), db)
    }

    fn from_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self {
            users,
            posts: PostService::new(posts.clone(), comments.clone(), votes.clone()),
            comments: CommentService::new(posts.clone(), comments),
            votes: VoteService::new(posts, votes),
        }
    }
}
