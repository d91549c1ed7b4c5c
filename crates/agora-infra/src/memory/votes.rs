use std::collections::hash_map::Entry;

use async_trait::async_trait;
use uuid::Uuid;

use agora_core::domain::{DailyVotes, Vote, VoteRange};
use agora_core::error::RepoError;
use agora_core::ports::VoteRepository;

use super::InMemoryDatabase;

#[async_trait]
impl VoteRepository for InMemoryDatabase {
    async fn insert(&self, vote: Vote) -> Result<Vote, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&vote.post_id) {
            return Err(RepoError::Query(format!("post {} does not exist", vote.post_id)));
        }
        match tables.votes.entry((vote.voter_id, vote.post_id)) {
            Entry::Occupied(_) => Err(RepoError::Constraint(
                "votes_voter_id_post_id_key".to_string(),
            )),
            Entry::Vacant(slot) => Ok(slot.insert(vote).clone()),
        }
    }

    async fn exists(&self, voter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.votes.contains_key(&(voter_id, post_id)))
    }

    async fn delete_by_voter_and_post(
        &self,
        voter_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError> {
        let mut tables = self.tables.write().await;
        Ok(tables.votes.remove(&(voter_id, post_id)).is_some())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.votes.values().filter(|v| v.post_id == post_id).count() as u64)
    }

    async fn count_by_day(&self, range: &VoteRange) -> Result<Vec<DailyVotes>, RepoError> {
        let tables = self.tables.read().await;
        Ok(DailyVotes::tally(
            tables.votes.values().map(|v| v.created_at),
            range,
        ))
    }
}
