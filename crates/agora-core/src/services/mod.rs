//! Domain services - business rules on top of the repository ports.

mod comments;
mod posts;
mod votes;

pub use comments::CommentService;
pub use posts::PostService;
pub use votes::VoteService;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository};

/// Load a post or fail with `NotFound`.
async fn existing_post(posts: &dyn PostRepository, id: Uuid) -> Result<Post, DomainError> {
    posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::not_found("Post", id))
}

/// Reject blank text fields.
fn require_text(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}
