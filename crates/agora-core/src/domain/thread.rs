//! In-memory ordering of comment forests.
//!
//! Storage hands back comments in no particular order; [`CommentTree`]
//! rebuilds the parent/child structure and walks it depth-first with
//! siblings in creation order.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::Comment;

/// A comment together with its (recursively nested) replies.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// A forest of comments indexed by id.
///
/// A comment whose parent is absent from the input is treated as a root,
/// so building from a subtree query yields a single tree rooted at the
/// requested comment.
#[derive(Debug, Clone, Default)]
pub struct CommentTree {
    comments: HashMap<Uuid, Comment>,
    roots: Vec<Uuid>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl CommentTree {
    pub fn build(comments: impl IntoIterator<Item = Comment>) -> Self {
        let comments: HashMap<Uuid, Comment> =
            comments.into_iter().map(|c| (c.id, c)).collect();

        let mut roots = Vec::new();
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for comment in comments.values() {
            match comment.parent_id.filter(|p| comments.contains_key(p)) {
                Some(parent) => children.entry(parent).or_default().push(comment.id),
                None => roots.push(comment.id),
            }
        }

        let creation_order = |a: &Uuid, b: &Uuid| -> Ordering {
            let (a, b) = (&comments[a], &comments[b]);
            (a.created_at, a.id).cmp(&(b.created_at, b.id))
        };
        roots.sort_by(creation_order);
        for siblings in children.values_mut() {
            siblings.sort_by(creation_order);
        }

        Self {
            comments,
            roots,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().filter_map(|id| self.comments.get(id))
    }

    pub fn replies(&self, id: Uuid) -> impl Iterator<Item = &Comment> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.comments.get(child))
    }

    /// Pre-order traversal: each comment is followed by its replies.
    /// Borrowing, so it can be walked any number of times.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Consume the tree into a flat, depth-first ordered list.
    pub fn into_depth_first(mut self) -> Vec<Comment> {
        let order: Vec<Uuid> = self.depth_first().map(|c| c.id).collect();
        order
            .into_iter()
            .filter_map(|id| self.comments.remove(&id))
            .collect()
    }

    /// Consume the tree into nested nodes, roots first.
    pub fn into_nodes(mut self) -> Vec<CommentNode> {
        let roots = std::mem::take(&mut self.roots);
        roots.into_iter().filter_map(|id| self.take_node(id)).collect()
    }

    fn take_node(&mut self, id: Uuid) -> Option<CommentNode> {
        let comment = self.comments.remove(&id)?;
        let replies = self
            .children
            .remove(&id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|child| self.take_node(child))
            .collect();
        Some(CommentNode { comment, replies })
    }
}

/// Iterator returned by [`CommentTree::depth_first`].
pub struct DepthFirst<'a> {
    tree: &'a CommentTree,
    stack: Vec<Uuid>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(children) = self.tree.children.get(&id) {
                self.stack.extend(children.iter().rev().copied());
            }
            if let Some(comment) = self.tree.comments.get(&id) {
                return Some(comment);
            }
        }
    }
}
