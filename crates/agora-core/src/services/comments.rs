use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentNode, CommentTree};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

use super::{existing_post, require_text};

/// Tree-structured comment store.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Add a comment to a post, at root level or as the newest reply of
    /// `parent_id`. The parent must belong to the same post.
    pub async fn create(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        content: String,
        parent_id: Option<Uuid>,
    ) -> Result<Comment, DomainError> {
        existing_post(self.posts.as_ref(), post_id).await?;
        let content = require_text("content", content)?;

        let comment = match parent_id {
            None => Comment::new(author_id, post_id, content),
            Some(parent_id) => {
                let parent = self.get(parent_id).await?;
                if parent.post_id != post_id {
                    return Err(DomainError::Validation(
                        "parent comment belongs to a different post".to_string(),
                    ));
                }
                Comment::reply_to(&parent, author_id, content)
            }
        };

        let saved = self.comments.insert(comment).await?;
        tracing::info!(
            comment_id = %saved.id,
            post_id = %post_id,
            parent_id = ?saved.parent_id,
            depth = saved.depth(),
            "Comment created"
        );
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Comment", id))
    }

    /// The comment followed by all of its replies, depth-first.
    pub async fn subtree(&self, id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let root = self.get(id).await?;
        let members = self.comments.find_subtree(&root).await?;
        Ok(CommentTree::build(members).into_depth_first())
    }

    /// Every comment on a post, nested by reply.
    pub async fn thread(&self, post_id: Uuid) -> Result<Vec<CommentNode>, DomainError> {
        existing_post(self.posts.as_ref(), post_id).await?;
        let comments = self.comments.find_by_post(post_id).await?;
        Ok(CommentTree::build(comments).into_nodes())
    }

    /// Remove a comment. Its replies survive and move up to root level.
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let comment = self.get(id).await?;
        if comment.author_id != actor {
            return Err(DomainError::Forbidden);
        }
        self.comments.delete_promoting_replies(&comment).await?;
        tracing::info!(comment_id = %id, post_id = %comment.post_id, "Comment deleted");
        Ok(())
    }
}
