//! Health Check Endpoint
//!
//! # Interview Q&A
//!
//! Q: Health check 엔드포인트는 왜 필요한가?
//! A: 로드밸런서 헬스체크, Kubernetes liveness/readiness probe, 모니터링 연동
//!
//! Q: 저장소 통계를 함께 내보내는 이유는?
//! A: in-memory 저장소이므로 재시작 여부를 이슈/시민 수로 바로 확인 가능

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::ApiError, AppState};

/// Health check 응답
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub issues: usize,
    pub citizens: usize,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let stats = state.repo.stats().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        message: "NagarSeva backend running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        issues: stats.issues,
        citizens: stats.citizens,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
