//! PostgreSQL vote ledger and daily aggregation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use agora_core::domain::{DailyVotes, Vote, VoteRange};
use agora_core::error::RepoError;
use agora_core::ports::VoteRepository;

use super::entity::vote::{self, Entity as VoteEntity};
use super::postgres_base::map_db_err;

/// Calendar day of a vote, independent of the session time zone.
const VOTE_DAY: &str = r#"("votes"."created_at" AT TIME ZONE 'UTC')::date"#;

#[derive(Debug, FromQueryResult)]
struct DailyVotesRow {
    day: chrono::NaiveDate,
    votes: i64,
}

/// Vote ledger backed by the `votes` table. One vote per voter and post is
/// guaranteed by the unique index on `(voter_id, post_id)`.
pub struct PostgresVoteRepository {
    db: DbConn,
}

impl PostgresVoteRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn insert(&self, vote: Vote) -> Result<Vote, RepoError> {
        let active: vote::ActiveModel = vote.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn exists(&self, voter_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let count = VoteEntity::find()
            .filter(vote::Column::VoterId.eq(voter_id))
            .filter(vote::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn delete_by_voter_and_post(
        &self,
        voter_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError> {
        let result = VoteEntity::delete_many()
            .filter(vote::Column::VoterId.eq(voter_id))
            .filter(vote::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        VoteEntity::find()
            .filter(vote::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_by_day(&self, range: &VoteRange) -> Result<Vec<DailyVotes>, RepoError> {
        let mut query = VoteEntity::find()
            .select_only()
            .column_as(Expr::cust(VOTE_DAY), "day")
            .column_as(Expr::col(vote::Column::Id).count(), "votes");

        if let Some(start) = range.start() {
            query = query.filter(vote::Column::CreatedAt.gte(start));
        }
        if let Some(end) = range.end_exclusive() {
            query = query.filter(vote::Column::CreatedAt.lt(end));
        }

        let rows = query
            .group_by(Expr::cust(VOTE_DAY))
            .order_by_asc(Expr::cust(VOTE_DAY))
            .into_model::<DailyVotesRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| DailyVotes::new(row.day, u64::try_from(row.votes).unwrap_or_default()))
            .collect())
    }
}
