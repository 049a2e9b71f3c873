//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//!
//! ```text
//! GET   /api/health                          - 서버 상태 확인
//!
//! POST  /api/issues                          - 이슈 신고
//! GET   /api/issues?status&category&city     - 이슈 목록
//! GET   /api/issues/:id                      - 이슈 조회
//! GET   /api/issues/by-complaint/:code       - 민원 코드로 조회
//! POST  /api/issues/:id/upvote               - 공감
//! PATCH /api/issues/:id/status               - 상태 변경
//! POST  /api/issues/:id/reward               - 보상 지급
//!
//! GET   /api/leaderboard                     - 포인트 상위 20명
//! GET   /api/user-summary?phone|name         - 시민 보상 요약
//! ```

pub mod health;
pub mod issues;
pub mod rewards;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// 라우터 생성
pub fn create_router(state: AppState) -> Router {
    // CORS 설정
    // 프로덕션: ALLOWED_ORIGINS에 지정된 도메인만 허용
    // 개발: 모든 origin 허용 (정적 프론트엔드가 다른 포트에서 뜰 수 있음)
    let cors = if state.config.is_production() {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let body_limit = state.config.body_limit_bytes;

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Issues
        .route("/issues", post(issues::create_issue).get(issues::list_issues))
        .route("/issues/by-complaint/:complaint_id", get(issues::get_by_complaint_id))
        .route("/issues/:id", get(issues::get_issue))
        .route("/issues/:id/upvote", post(issues::upvote_issue))
        .route("/issues/:id/status", patch(issues::update_status))

        // Rewards
        .route("/issues/:id/reward", post(rewards::award_reward))
        .route("/leaderboard", get(rewards::leaderboard))
        .route("/user-summary", get(rewards::user_summary));

    Router::new()
        .nest("/api", api)

        // 미들웨어
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}
