use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, DailyVotes, Post, PostFilter, User, Vote, VoteRange};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Deleting a post removes its comments and votes.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching the filter, newest first, paged by limit/offset.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;
}

/// Storage for the comment forest.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// `root` and every comment below it, in no particular order.
    async fn find_subtree(&self, root: &Comment) -> Result<Vec<Comment>, RepoError>;

    /// Every comment on a post, in no particular order.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Atomically remove `comment` and promote its direct replies to the
    /// post's root level, rewriting the paths of everything below it.
    async fn delete_promoting_replies(&self, comment: &Comment) -> Result<(), RepoError>;
}

/// The vote ledger.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Persist a vote. Must fail with [`RepoError::Constraint`] when the
    /// voter already voted on the post, atomically with the write.
    async fn insert(&self, vote: Vote) -> Result<Vote, RepoError>;

    async fn exists(&self, voter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;

    /// Returns `false` when there was no vote to delete.
    async fn delete_by_voter_and_post(
        &self,
        voter_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError>;

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    /// Votes per UTC calendar day inside `range`, ascending by date.
    async fn count_by_day(&self, range: &VoteRange) -> Result<Vec<DailyVotes>, RepoError>;
}
