use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{DailyVotes, Vote, VoteRange};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, VoteRepository};

use super::existing_post;

/// Vote ledger and per-day analytics.
#[derive(Clone)]
pub struct VoteService {
    posts: Arc<dyn PostRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl VoteService {
    pub fn new(posts: Arc<dyn PostRepository>, votes: Arc<dyn VoteRepository>) -> Self {
        Self { posts, votes }
    }

    /// Record a vote. The existence check only short-circuits the common
    /// case; the storage constraint is what guarantees one vote per voter
    /// and post when requests race.
    pub async fn cast(&self, voter_id: Uuid, post_id: Uuid) -> Result<Vote, DomainError> {
        existing_post(self.posts.as_ref(), post_id).await?;

        if self.votes.exists(voter_id, post_id).await? {
            return Err(DomainError::AlreadyVoted);
        }

        match self.votes.insert(Vote::new(voter_id, post_id)).await {
            Ok(vote) => {
                tracing::info!(vote_id = %vote.id, voter_id = %voter_id, post_id = %post_id, "Vote cast");
                Ok(vote)
            }
            Err(RepoError::Constraint(msg)) => {
                tracing::debug!(voter_id = %voter_id, post_id = %post_id, %msg, "Concurrent duplicate vote");
                Err(DomainError::AlreadyVoted)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn retract(&self, voter_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        if !self.votes.delete_by_voter_and_post(voter_id, post_id).await? {
            return Err(DomainError::NotVoted);
        }
        tracing::info!(voter_id = %voter_id, post_id = %post_id, "Vote retracted");
        Ok(())
    }

    pub async fn has_voted(&self, voter_id: Uuid, post_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.votes.exists(voter_id, post_id).await?)
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<u64, DomainError> {
        Ok(self.votes.count_by_post(post_id).await?)
    }

    /// Votes per day, ascending by date.
    pub async fn aggregate(&self, range: VoteRange) -> Result<Vec<DailyVotes>, DomainError> {
        Ok(self.votes.count_by_day(&range).await?)
    }
}
