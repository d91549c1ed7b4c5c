//! Comment tree handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_core::domain::Comment;
use agora_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author_id: comment.author_id,
        post_id: comment.post_id,
        parent_id: comment.parent_id,
        depth: comment.depth(),
        content: comment.content,
        created_at: comment.created_at,
    }
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .comments
        .create(identity.user_id, path.into_inner(), req.content, req.parent_id)
        .await?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// GET /api/comments/{id} - the comment and its replies, depth-first.
pub async fn subtree(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let comments: Vec<CommentResponse> = state
        .comments
        .subtree(path.into_inner())
        .await?
        .into_iter()
        .map(comment_response)
        .collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .comments
        .delete(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
