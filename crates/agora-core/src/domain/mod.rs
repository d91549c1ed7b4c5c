//! Domain entities - the core business objects.

mod comment;
mod post;
mod thread;
mod user;
mod vote;

pub use comment::{Comment, PATH_SEPARATOR};
pub use post::{Post, PostChanges, PostDetail, PostFilter, PostSummary};
pub use thread::{CommentNode, CommentTree, DepthFirst};
pub use user::User;
pub use vote::{DailyVotes, Vote, VoteRange};
