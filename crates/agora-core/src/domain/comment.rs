use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between ancestor ids in a comment path.
pub const PATH_SEPARATOR: char = '/';

/// A threaded reply attached to a post.
///
/// Besides the adjacency link (`parent_id`) every comment carries a
/// materialized `path`: the ids of its ancestors from the root down,
/// followed by its own id, joined with [`PATH_SEPARATOR`]. A subtree is
/// therefore the comment itself plus every comment whose path starts with
/// [`Comment::subtree_prefix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub path: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a root-level comment on a post.
    pub fn new(author_id: Uuid, post_id: Uuid, content: String) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            author_id,
            post_id,
            parent_id: None,
            path: id.to_string(),
            content,
            created_at: Utc::now(),
        }
    }

    /// Create a reply nested under `parent`. The reply inherits the parent's
    /// post.
    pub fn reply_to(parent: &Comment, author_id: Uuid, content: String) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            author_id,
            post_id: parent.post_id,
            parent_id: Some(parent.id),
            path: format!("{}{}", parent.subtree_prefix(), id),
            content,
            created_at: Utc::now(),
        }
    }

    /// Prefix shared by the paths of every descendant.
    pub fn subtree_prefix(&self) -> String {
        format!("{}{}", self.path, PATH_SEPARATOR)
    }

    /// Zero for root comments.
    pub fn depth(&self) -> usize {
        self.path.matches(PATH_SEPARATOR).count()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_descendant_of(&self, ancestor: &Comment) -> bool {
        self.path.starts_with(&ancestor.subtree_prefix())
    }

    /// Rewrite this comment's tree position after `removed`, one of its
    /// ancestors, is deleted. Direct children of `removed` become roots and
    /// deeper descendants keep their chain up to that new root. Returns
    /// `false` if this comment is not below `removed`.
    pub fn detach_from(&mut self, removed: &Comment) -> bool {
        let Some(rest) = self.path.strip_prefix(&removed.subtree_prefix()) else {
            return false;
        };
        self.path = rest.to_string();
        if self.parent_id == Some(removed.id) {
            self.parent_id = None;
        }
        true
    }
}
