//! Vote analytics.

use actix_web::{HttpResponse, web};

use agora_core::domain::VoteRange;
use agora_shared::dto::{DailyVotesResponse, VoteAnalyticsQuery};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/analytics/votes?date_from=YYYY-MM-DD&date_to=YYYY-MM-DD
pub async fn daily_votes(
    state: web::Data<AppState>,
    query: web::Query<VoteAnalyticsQuery>,
) -> AppResult<HttpResponse> {
    let range = VoteRange::new(query.date_from, query.date_to)?;

    let days: Vec<DailyVotesResponse> = state
        .votes
        .aggregate(range)
        .await?
        .into_iter()
        .map(|day| DailyVotesResponse {
            date: day.date,
            votes: day.votes,
        })
        .collect();

    Ok(HttpResponse::Ok().json(days))
}
