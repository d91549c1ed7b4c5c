//! In-memory storage - used when no database is configured, and by tests.
//!
//! All tables sit behind a single async `RwLock`, so every write is atomic
//! with respect to every other: the vote uniqueness check and insert happen
//! under the same guard, and deletes cascade the way the SQL schema does.
//! Data is lost on process restart.

mod comments;
mod posts;
mod users;
mod votes;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Comment, Post, User, Vote};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    /// Keyed by `(voter_id, post_id)`: one vote per pair by construction.
    votes: HashMap<(Uuid, Uuid), Vote>,
}

impl Tables {
    /// Remove a comment and promote its replies, as `ON DELETE SET NULL`
    /// plus the path rewrite does in PostgreSQL.
    fn remove_comment(&mut self, id: Uuid) -> Option<Comment> {
        let removed = self.comments.remove(&id)?;
        for comment in self.comments.values_mut() {
            comment.detach_from(&removed);
        }
        Some(removed)
    }

    fn remove_post(&mut self, id: Uuid) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.comments.retain(|_, c| c.post_id != id);
        self.votes.retain(|_, v| v.post_id != id);
        Some(post)
    }

    fn remove_user(&mut self, id: Uuid) -> Option<User> {
        let user = self.users.remove(&id)?;

        let posts: Vec<Uuid> = self
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post in posts {
            self.remove_post(post);
        }

        let comments: Vec<Uuid> = self
            .comments
            .values()
            .filter(|c| c.author_id == id)
            .map(|c| c.id)
            .collect();
        for comment in comments {
            self.remove_comment(comment);
        }

        self.votes.retain(|(voter, _), _| *voter != id);
        Some(user)
    }
}

/// In-memory implementation of every repository port.
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}
