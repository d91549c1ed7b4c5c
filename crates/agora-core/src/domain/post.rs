use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CommentNode;

/// Post entity - a top-level content item authored by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Apply a partial update. Returns `false` when nothing changed, in which
    /// case `updated_at` is left alone.
    pub fn apply(&mut self, changes: PostChanges) -> bool {
        let mut changed = false;
        if let Some(title) = changes.title {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }
        if let Some(content) = changes.content {
            if content != self.content {
                self.content = content;
                changed = true;
            }
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Partial update of a post; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Listing filter with limit/offset paging.
#[derive(Debug, Clone, Copy)]
pub struct PostFilter {
    pub author_id: Option<Uuid>,
    pub limit: u64,
    pub offset: u64,
}

impl PostFilter {
    pub const DEFAULT_LIMIT: u64 = 20;
    pub const MAX_LIMIT: u64 = 100;

    pub fn new(author_id: Option<Uuid>, limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            author_id,
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.author_id.is_none_or(|author| post.author_id == author)
    }
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// A post as it appears in listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    #[serde(flatten)]
    pub post: Post,
    pub votes: u64,
}

/// A post with its full comment thread.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub votes: u64,
    pub comments: Vec<CommentNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_bumps_updated_at() {
        let mut post = Post::new(Uuid::new_v4(), "Title".into(), "Body".into());
        let before = post.updated_at;

        let changed = post.apply(PostChanges {
            title: Some("New title".into()),
            content: None,
        });

        assert!(changed);
        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "Body");
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_apply_identical_changes_is_noop() {
        let mut post = Post::new(Uuid::new_v4(), "Title".into(), "Body".into());
        let before = post.updated_at;

        assert!(!post.apply(PostChanges {
            title: Some("Title".into()),
            content: Some("Body".into()),
        }));
        assert_eq!(post.updated_at, before);
    }

    #[test]
    fn test_filter_limit_is_clamped() {
        assert_eq!(PostFilter::new(None, Some(0), None).limit, 1);
        assert_eq!(PostFilter::new(None, Some(500), None).limit, PostFilter::MAX_LIMIT);
        assert_eq!(PostFilter::default().limit, PostFilter::DEFAULT_LIMIT);
    }

    #[test]
    fn test_filter_matches_author() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "t".into(), "c".into());

        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter::new(Some(author), None, None).matches(&post));
        assert!(!PostFilter::new(Some(Uuid::new_v4()), None, None).matches(&post));
    }
}
