//! PostgreSQL comment forest.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use agora_core::domain::Comment;
use agora_core::error::RepoError;
use agora_core::ports::CommentRepository;

use super::entity::comment::{self, Entity as CommentEntity};
use super::postgres_base::map_db_err;

pub struct PostgresCommentRepository {
    db: DbConn,
}

impl PostgresCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = comment.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_subtree(&self, root: &Comment) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(root.post_id))
            .filter(
                Condition::any()
                    .add(comment::Column::Path.eq(root.path.as_str()))
                    .add(comment::Column::Path.starts_with(root.subtree_prefix())),
            )
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_promoting_replies(&self, comment: &Comment) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let descendants = CommentEntity::find()
            .filter(comment::Column::PostId.eq(comment.post_id))
            .filter(comment::Column::Path.starts_with(comment.subtree_prefix()))
            .all(&txn)
            .await
            .map_err(map_db_err)?;
        let moved = descendants.len();

        for model in descendants {
            let mut descendant: Comment = model.into();
            descendant.detach_from(comment);
            comment::ActiveModel::from(descendant)
                .update(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let result = CommentEntity::delete_by_id(comment.id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            // Dropping the transaction rolls the path rewrites back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(comment_id = %comment.id, moved, "Comment removed, replies promoted");
        Ok(())
    }
}
