//! Reward Endpoints
//!
//! Reward approval, the public leaderboard, and the citizen rewards page summary.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::issues::parse_issue_id;
use crate::{
    db::{IdentityLookup, RewardOutcome, User},
    error::ApiError,
    services::UserSummary,
    AppState,
};

// ============ Request/Response Types ============

/// 보상 지급 요청
///
/// amount가 숫자가 아니면 무시하고 추정 공식 사용
#[derive(Debug, Default, Deserialize)]
pub struct RewardRequest {
    pub amount: Option<serde_json::Value>,
}

impl RewardRequest {
    fn numeric_amount(&self) -> Option<f64> {
        self.amount.as_ref().and_then(serde_json::Value::as_f64)
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<User>,
}

// ============ Handlers ============

/// POST /api/issues/:id/reward
///
/// # Response
///
/// ```json
/// { "issue": { ... "reward": { "amount": 30.0, "currency": "INR", "awarded": true } },
///   "reporter": { "id": "9876543210", "points": 30.0, "totalRewards": 30.0, ... } }
/// ```
pub async fn award_reward(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<RewardRequest>>,
) -> Result<Json<RewardOutcome>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let outcome = state
        .repo
        .award(parse_issue_id(&id)?, req.numeric_amount())
        .await?;

    Ok(Json(outcome))
}

/// GET /api/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let leaderboard = state.repo.leaderboard().await?;
    Ok(Json(LeaderboardResponse { leaderboard }))
}

/// GET /api/user-summary?phone=...|name=...
pub async fn user_summary(
    State(state): State<AppState>,
    Query(lookup): Query<IdentityLookup>,
) -> Result<Json<UserSummary>, ApiError> {
    let summary = state.repo.user_summary(&lookup).await?;
    Ok(Json(summary))
}
