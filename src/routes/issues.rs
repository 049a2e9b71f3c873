//! Issue Endpoints
//!
//! Citizen-facing submission, tracking and upvoting, plus the department-facing
//! status update. Handlers only translate HTTP to repository calls.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{Issue, IssueFilter, NewIssue},
    error::ApiError,
    AppState,
};

// ============ Request/Response Types ============

/// 단일 이슈 응답
#[derive(Debug, Serialize)]
pub struct IssueResponse {
    pub issue: Issue,
}

/// 목록 응답
#[derive(Debug, Serialize)]
pub struct IssueListResponse {
    pub issues: Vec<Issue>,
}

/// 상태 변경 요청
///
/// status는 문자열로 받아 직접 검증 (역직렬화 실패 대신 INVALID_STATUS 반환)
#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub note: Option<String>,
}

// ============ Handlers ============

/// POST /api/issues
///
/// # Request
///
/// ```json
/// {
///   "category": "pothole",
///   "description": "Deep pothole near the bus stop",
///   "imageData": "data:image/jpeg;base64,...",
///   "city": "Pune",
///   "reporterName": "Asha",
///   "reporterPhone": "9876543210"
/// }
/// ```
pub async fn create_issue(
    State(state): State<AppState>,
    body: Option<Json<NewIssue>>,
) -> Result<(StatusCode, Json<IssueResponse>), ApiError> {
    // 본문이 없거나 깨졌으면 필수 필드 누락과 동일하게 처리
    let new = body.map(|Json(new)| new).unwrap_or_default();
    let issue = state.repo.create_issue(new).await?;

    Ok((StatusCode::CREATED, Json(IssueResponse { issue })))
}

/// GET /api/issues?status&category&city
pub async fn list_issues(
    State(state): State<AppState>,
    Query(filter): Query<IssueFilter>,
) -> Result<Json<IssueListResponse>, ApiError> {
    let issues = state.repo.list_issues(&filter).await?;
    Ok(Json(IssueListResponse { issues }))
}

/// GET /api/issues/:id
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IssueResponse>, ApiError> {
    let issue = state.repo.get_issue(parse_issue_id(&id)?).await?;
    Ok(Json(IssueResponse { issue }))
}

/// GET /api/issues/by-complaint/:complaint_id
///
/// 시민이 민원 코드(FIX-2025-0001)로 진행 상황 조회
pub async fn get_by_complaint_id(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
) -> Result<Json<IssueResponse>, ApiError> {
    let issue = state.repo.get_by_complaint_id(&complaint_id).await?;
    Ok(Json(IssueResponse { issue }))
}

/// POST /api/issues/:id/upvote
pub async fn upvote_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IssueResponse>, ApiError> {
    let issue = state.repo.upvote(parse_issue_id(&id)?).await?;
    Ok(Json(IssueResponse { issue }))
}

/// PATCH /api/issues/:id/status
///
/// 부서 포털에서 상태 변경 (전이 제한 없음)
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<StatusUpdateRequest>>,
) -> Result<Json<IssueResponse>, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let issue = state
        .repo
        .set_status(
            parse_issue_id(&id)?,
            req.status.as_deref().unwrap_or_default(),
            req.note,
        )
        .await?;

    Ok(Json(IssueResponse { issue }))
}

// ============ Helpers ============

/// UUID 형식이 아니면 존재하지 않는 이슈로 취급
pub(crate) fn parse_issue_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Issue".to_string()))
}
