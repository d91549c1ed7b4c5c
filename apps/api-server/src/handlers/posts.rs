//! Post catalogue handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::domain::{CommentNode, Post, PostChanges, PostFilter};
use agora_shared::dto::{
    CommentThreadResponse, CreatePostRequest, ListPostsQuery, PostDetailResponse, PostResponse,
    PostSummaryResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn thread_response(node: CommentNode) -> CommentThreadResponse {
    let CommentNode { comment, replies } = node;
    CommentThreadResponse {
        id: comment.id,
        author_id: comment.author_id,
        parent_id: comment.parent_id,
        content: comment.content,
        created_at: comment.created_at,
        replies: replies.into_iter().map(thread_response).collect(),
    }
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter::new(query.author_id, query.limit, query.offset);

    let summaries: Vec<PostSummaryResponse> = state
        .posts
        .list(&filter)
        .await?
        .into_iter()
        .map(|summary| PostSummaryResponse {
            post: post_response(summary.post),
            votes: summary.votes,
        })
        .collect();

    Ok(HttpResponse::Ok().json(summaries))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(identity.user_id, req.title, req.content)
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let detail = state.posts.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(detail.post),
        votes: detail.votes,
        comments: detail.comments.into_iter().map(thread_response).collect(),
    }))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
    };
    let post = state
        .posts
        .update(identity.user_id, path.into_inner(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
