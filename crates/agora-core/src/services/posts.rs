use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{CommentTree, Post, PostChanges, PostDetail, PostFilter, PostSummary};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CommentRepository, PostRepository, VoteRepository};

use super::{existing_post, require_text};

/// Post catalogue: CRUD with author-only mutation.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            votes,
        }
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        let post = Post::new(
            author_id,
            require_text("title", title)?,
            require_text("content", content)?,
        );
        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, author_id = %author_id, "Post created");
        Ok(saved)
    }

    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<PostSummary>, DomainError> {
        let posts = self.posts.list(filter).await?;
        let mut summaries = Vec::with_capacity(posts.len());
        for post in posts {
            let votes = self.votes.count_by_post(post.id).await?;
            summaries.push(PostSummary { post, votes });
        }
        Ok(summaries)
    }

    /// The post with its comment thread nested by reply.
    pub async fn get(&self, id: Uuid) -> Result<PostDetail, DomainError> {
        let post = existing_post(self.posts.as_ref(), id).await?;
        let comments = CommentTree::build(self.comments.find_by_post(id).await?).into_nodes();
        let votes = self.votes.count_by_post(id).await?;
        Ok(PostDetail {
            post,
            votes,
            comments,
        })
    }

    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned(actor, id).await?;
        let changes = PostChanges {
            title: changes.title.map(|t| require_text("title", t)).transpose()?,
            content: changes
                .content
                .map(|c| require_text("content", c))
                .transpose()?,
        };
        if !post.apply(changes) {
            return Ok(post);
        }
        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(saved)
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.owned(actor, id).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn owned(&self, actor: Uuid, id: Uuid) -> Result<Post, DomainError> {
        let post = existing_post(self.posts.as_ref(), id).await?;
        if !post.is_owned_by(actor) {
            tracing::warn!(post_id = %id, actor = %actor, "Rejected mutation by non-author");
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }
}
