//! Vote ledger handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use agora_shared::dto::{VoteResponse, VoteStatusResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/vote
pub async fn cast(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let vote = state.votes.cast(identity.user_id, path.into_inner()).await?;

    Ok(HttpResponse::Created().json(VoteResponse {
        id: vote.id,
        voter_id: vote.voter_id,
        post_id: vote.post_id,
        created_at: vote.created_at,
    }))
}

/// DELETE /api/posts/{id}/vote
pub async fn retract(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .votes
        .retract(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/{id}/vote
pub async fn status(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let voted = state
        .votes
        .has_voted(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(VoteStatusResponse { voted }))
}
