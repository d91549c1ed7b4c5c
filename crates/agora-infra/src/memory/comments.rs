use async_trait::async_trait;
use uuid::Uuid;

use agora_core::domain::Comment;
use agora_core::error::RepoError;
use agora_core::ports::CommentRepository;

use super::InMemoryDatabase;

#[async_trait]
impl CommentRepository for InMemoryDatabase {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Query(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        if tables.comments.contains_key(&comment.id) {
            return Err(RepoError::Constraint("comments_pkey".to_string()));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn find_subtree(&self, root: &Comment) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let Some(root) = tables.comments.get(&root.id) else {
            return Ok(Vec::new());
        };
        Ok(tables
            .comments
            .values()
            .filter(|c| c.id == root.id || c.is_descendant_of(root))
            .cloned()
            .collect())
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn delete_promoting_replies(&self, comment: &Comment) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .remove_comment(comment.id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
