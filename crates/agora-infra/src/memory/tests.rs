//! Behavioral tests of the domain services running on the in-memory store.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use agora_core::domain::{DailyVotes, Post, PostChanges, PostFilter, User, Vote, VoteRange};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, PostRepository, UserRepository, VoteRepository};
use agora_core::{CommentService, DomainError, PostService, VoteService};

use super::InMemoryDatabase;

struct Harness {
    db: Arc<InMemoryDatabase>,
    posts: PostService,
    comments: CommentService,
    votes: VoteService,
}

impl Harness {
    fn new() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        Self {
            posts: PostService::new(db.clone(), db.clone(), db.clone()),
            comments: CommentService::new(db.clone(), db.clone()),
            votes: VoteService::new(db.clone(), db.clone()),
            db,
        }
    }

    async fn post(&self, author: Uuid) -> Post {
        self.posts
            .create(author, "Title".into(), "Content".into())
            .await
            .unwrap()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// --- Vote ledger ---

#[tokio::test]
async fn test_cast_then_has_voted_and_second_cast_rejected() {
    let h = Harness::new();
    let voter = Uuid::new_v4();
    let post = h.post(Uuid::new_v4()).await;

    h.votes.cast(voter, post.id).await.unwrap();
    assert!(h.votes.has_voted(voter, post.id).await.unwrap());

    let second = h.votes.cast(voter, post.id).await;
    assert!(matches!(second, Err(DomainError::AlreadyVoted)));
}

#[tokio::test]
async fn test_retract_without_vote_is_not_voted_every_time() {
    let h = Harness::new();
    let post = h.post(Uuid::new_v4()).await;
    let voter = Uuid::new_v4();

    for _ in 0..2 {
        let result = h.votes.retract(voter, post.id).await;
        assert!(matches!(result, Err(DomainError::NotVoted)));
    }
}

#[tokio::test]
async fn test_cast_retract_round_trip() {
    let h = Harness::new();
    let voter = Uuid::new_v4();
    let post = h.post(Uuid::new_v4()).await;

    h.votes.cast(voter, post.id).await.unwrap();
    assert_eq!(h.votes.count_for_post(post.id).await.unwrap(), 1);
    h.votes.retract(voter, post.id).await.unwrap();
    assert_eq!(h.votes.count_for_post(post.id).await.unwrap(), 0);

    assert!(!h.votes.has_voted(voter, post.id).await.unwrap());
    assert!(matches!(
        h.votes.retract(voter, post.id).await,
        Err(DomainError::NotVoted)
    ));
    // Voting again after a retraction is allowed.
    h.votes.cast(voter, post.id).await.unwrap();
}

#[tokio::test]
async fn test_cast_on_missing_post_is_not_found() {
    let h = Harness::new();
    let result = h.votes.cast(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "Post",
            ..
        })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_casts_record_exactly_one_vote() {
    let h = Harness::new();
    let voter = Uuid::new_v4();
    let post = h.post(Uuid::new_v4()).await;

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let votes = h.votes.clone();
            tokio::spawn(async move { votes.cast(voter, post.id).await })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(DomainError::AlreadyVoted) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(h.db.count_by_post(post.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_storage_rejects_duplicate_vote_without_prior_check() {
    let h = Harness::new();
    let voter = Uuid::new_v4();
    let post = h.post(Uuid::new_v4()).await;

    h.db.insert(Vote::new(voter, post.id)).await.unwrap();
    let duplicate = h.db.insert(Vote::new(voter, post.id)).await;

    assert!(matches!(duplicate, Err(RepoError::Constraint(_))));
}

// --- Vote analytics ---

async fn seed_votes(h: &Harness, days: &[(i32, u32, u32)]) {
    let post = h.post(Uuid::new_v4()).await;
    for &(y, m, d) in days {
        let mut vote = Vote::new(Uuid::new_v4(), post.id);
        vote.created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        h.db.insert(vote).await.unwrap();
    }
}

#[tokio::test]
async fn test_aggregate_counts_per_day_ascending() {
    let h = Harness::new();
    seed_votes(&h, &[(2024, 1, 2), (2024, 1, 1), (2024, 1, 1), (2024, 1, 1)]).await;

    let all = h.votes.aggregate(VoteRange::default()).await.unwrap();
    assert_eq!(
        all,
        vec![
            DailyVotes::new(date(2024, 1, 1), 3),
            DailyVotes::new(date(2024, 1, 2), 1),
        ]
    );

    let from_second = VoteRange::new(Some(date(2024, 1, 2)), None).unwrap();
    assert_eq!(
        h.votes.aggregate(from_second).await.unwrap(),
        vec![DailyVotes::new(date(2024, 1, 2), 1)]
    );

    let until_first = VoteRange::new(None, Some(date(2024, 1, 1))).unwrap();
    assert_eq!(
        h.votes.aggregate(until_first).await.unwrap(),
        vec![DailyVotes::new(date(2024, 1, 1), 3)]
    );
}

#[tokio::test]
async fn test_aggregate_empty_ledger() {
    let h = Harness::new();
    assert!(h.votes.aggregate(VoteRange::default()).await.unwrap().is_empty());
}

// --- Comment tree ---

#[tokio::test]
async fn test_subtree_is_depth_first_and_includes_replies() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;

    let root = h.comments.create(author, post.id, "root".into(), None).await.unwrap();
    let a = h.comments.create(author, post.id, "a".into(), Some(root.id)).await.unwrap();
    let a1 = h.comments.create(author, post.id, "a1".into(), Some(a.id)).await.unwrap();
    let b = h.comments.create(author, post.id, "b".into(), Some(root.id)).await.unwrap();
    h.comments.create(author, post.id, "other root".into(), None).await.unwrap();

    let subtree = h.comments.subtree(root.id).await.unwrap();
    let ids: Vec<Uuid> = subtree.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![root.id, a.id, a1.id, b.id]);

    let again = h.comments.subtree(root.id).await.unwrap();
    assert_eq!(again, subtree);

    let leaf = h.comments.subtree(a1.id).await.unwrap();
    assert_eq!(leaf.len(), 1);
}

#[tokio::test]
async fn test_deleting_parent_promotes_replies() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;

    let parent = h.comments.create(author, post.id, "parent".into(), None).await.unwrap();
    let child = h.comments.create(author, post.id, "child".into(), Some(parent.id)).await.unwrap();
    let grandchild = h
        .comments
        .create(author, post.id, "grandchild".into(), Some(child.id))
        .await
        .unwrap();

    assert!(h.comments.subtree(parent.id).await.unwrap().contains(&child));

    h.comments.delete(author, parent.id).await.unwrap();

    let child = h.comments.get(child.id).await.unwrap();
    assert_eq!(child.parent_id, None);
    assert_eq!(child.path, child.id.to_string());

    let grandchild = h.comments.get(grandchild.id).await.unwrap();
    assert_eq!(grandchild.parent_id, Some(child.id));
    assert!(grandchild.is_descendant_of(&child));

    let subtree: Vec<Uuid> = h
        .comments
        .subtree(child.id)
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(subtree, vec![child.id, grandchild.id]);

    assert!(matches!(
        h.comments.get(parent.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let h = Harness::new();
    let result = h
        .comments
        .create(Uuid::new_v4(), Uuid::new_v4(), "hello".into(), None)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "Post",
            ..
        })
    ));
}

#[tokio::test]
async fn test_reply_to_missing_parent_is_not_found() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;

    let result = h
        .comments
        .create(author, post.id, "hello".into(), Some(Uuid::new_v4()))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "Comment",
            ..
        })
    ));
}

#[tokio::test]
async fn test_parent_from_other_post_is_rejected() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let first = h.post(author).await;
    let second = h.post(author).await;

    let parent = h.comments.create(author, first.id, "on first".into(), None).await.unwrap();
    let result = h
        .comments
        .create(author, second.id, "cross".into(), Some(parent.id))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;

    let result = h.comments.create(author, post.id, "   ".into(), None).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_only_author_deletes_comment() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;
    let comment = h.comments.create(author, post.id, "mine".into(), None).await.unwrap();

    let result = h.comments.delete(Uuid::new_v4(), comment.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden)));
    assert!(h.comments.get(comment.id).await.is_ok());
}

#[tokio::test]
async fn test_thread_nests_replies() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;

    let first = h.comments.create(author, post.id, "first".into(), None).await.unwrap();
    h.comments.create(author, post.id, "reply".into(), Some(first.id)).await.unwrap();
    h.comments.create(author, post.id, "second".into(), None).await.unwrap();

    let thread = h.comments.thread(post.id).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].comment.content, "first");
    assert_eq!(thread[0].replies[0].comment.content, "reply");
    assert_eq!(thread[1].comment.content, "second");
}

// --- Posts ---

#[tokio::test]
async fn test_only_author_updates_or_deletes_post() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;
    let changes = PostChanges {
        title: Some("Edited".into()),
        content: None,
    };

    let stranger = Uuid::new_v4();
    assert!(matches!(
        h.posts.update(stranger, post.id, changes.clone()).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        h.posts.delete(stranger, post.id).await,
        Err(DomainError::Forbidden)
    ));

    let updated = h.posts.update(author, post.id, changes).await.unwrap();
    assert_eq!(updated.title, "Edited");
    assert_eq!(updated.content, "Content");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let h = Harness::new();
    let result = h
        .posts
        .update(Uuid::new_v4(), Uuid::new_v4(), PostChanges::default())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let h = Harness::new();
    let result = h.posts.create(Uuid::new_v4(), " ".into(), "body".into()).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_deleting_post_cascades() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;
    let comment = h.comments.create(author, post.id, "c".into(), None).await.unwrap();
    h.votes.cast(author, post.id).await.unwrap();

    h.posts.delete(author, post.id).await.unwrap();

    assert!(matches!(h.posts.get(post.id).await, Err(DomainError::NotFound { .. })));
    assert!(h.comments.get(comment.id).await.is_err());
    assert!(!h.votes.has_voted(author, post.id).await.unwrap());
    assert!(h.votes.aggregate(VoteRange::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_newest_first_with_votes_and_paging() {
    let h = Harness::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let older = h.post(alice).await;
    let newer = h.post(alice).await;
    h.post(bob).await;
    h.votes.cast(bob, older.id).await.unwrap();

    let alices = h
        .posts
        .list(&PostFilter::new(Some(alice), None, None))
        .await
        .unwrap();
    let ids: Vec<Uuid> = alices.iter().map(|s| s.post.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(alices[1].votes, 1);

    let page = h
        .posts
        .list(&PostFilter::new(None, Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_post_detail_contains_thread_and_votes() {
    let h = Harness::new();
    let author = Uuid::new_v4();
    let post = h.post(author).await;
    let root = h.comments.create(author, post.id, "root".into(), None).await.unwrap();
    h.comments.create(author, post.id, "reply".into(), Some(root.id)).await.unwrap();
    h.votes.cast(author, post.id).await.unwrap();

    let detail = h.posts.get(post.id).await.unwrap();
    assert_eq!(detail.votes, 1);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].replies.len(), 1);
}

// --- Users ---

#[tokio::test]
async fn test_duplicate_email_is_constraint_violation() {
    let db = InMemoryDatabase::new();
    let users: &dyn UserRepository = &db;

    users.save(User::new("a@example.com", "h".into())).await.unwrap();
    let result = users.save(User::new("A@Example.com", "h".into())).await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
    assert!(users.find_by_email("A@EXAMPLE.COM").await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_user_cascades_to_posts_and_votes() {
    let h = Harness::new();
    let users: &dyn UserRepository = &*h.db;
    let posts: &dyn PostRepository = &*h.db;

    let user = users.save(User::new("gone@example.com", "h".into())).await.unwrap();
    let own = h.post(user.id).await;
    let other = h.post(Uuid::new_v4()).await;
    h.votes.cast(user.id, other.id).await.unwrap();

    users.delete(user.id).await.unwrap();

    assert!(posts.find_by_id(own.id).await.unwrap().is_none());
    assert!(!h.votes.has_voted(user.id, other.id).await.unwrap());
}
