//! Error Handling Module
//!
//! Two layers:
//! - `IssueError`: domain failures raised by the repository and the lifecycle/reward engine
//! - `ApiError`: HTTP-facing errors with status code mapping
//!
//! Every domain failure is terminal and detected locally, so there is no retry
//! classification. Internal faults are logged and never leak details to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// 도메인 에러 (repository / services 레이어)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueError {
    /// 필수 입력 누락 또는 잘못된 값
    #[error("{0}")]
    Validation(String),

    /// 참조한 이슈 또는 시민이 존재하지 않음
    #[error("{0} not found")]
    NotFound(String),

    /// 인식할 수 없는 상태 값
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("issue must be resolved before rewarding")]
    NotResolved,

    #[error("reward already awarded")]
    AlreadyAwarded,

    /// 불변식 위반 등 예상치 못한 내부 오류
    #[error("internal fault: {0}")]
    Internal(String),
}

impl IssueError {
    pub fn issue_not_found() -> Self {
        IssueError::NotFound("Issue".to_string())
    }
}

/// API 에러 타입
///
/// # Design Decision
///
/// 각 에러 variant는 적절한 HTTP 상태 코드에 매핑됨
/// - 클라이언트 에러: 400 / 404
/// - 서버 에러: 500 (상세 정보는 로그에만 남김)
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Issue must be resolved before rewarding")]
    NotResolved,

    #[error("Reward already awarded")]
    AlreadyAwarded,

    // ============ 404 Not Found ============
    #[error("Resource not found: {0}")]
    NotFound(String),

    // ============ 500 Internal Server Error ============
    #[error("Internal server error")]
    InternalError,
}

/// API 에러 응답 구조
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // 4xx 클라이언트 에러
            ApiError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            ApiError::InvalidStatus(value) => (
                StatusCode::BAD_REQUEST,
                "INVALID_STATUS",
                "Invalid status".to_string(),
                Some(format!(
                    "'{}' is not one of new, in_progress, resolved, rejected",
                    value
                )),
            ),
            ApiError::NotResolved => (
                StatusCode::BAD_REQUEST,
                "NOT_RESOLVED",
                "Issue must be resolved before rewarding".to_string(),
                None,
            ),
            ApiError::AlreadyAwarded => (
                StatusCode::BAD_REQUEST,
                "ALREADY_AWARDED",
                "Reward already awarded".to_string(),
                None,
            ),
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", resource),
                None,
            ),

            // 5xx 서버 에러
            ApiError::InternalError => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// 도메인 에러를 ApiError로 변환
impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::Validation(msg) => ApiError::ValidationError(msg),
            IssueError::NotFound(resource) => ApiError::NotFound(resource),
            IssueError::InvalidStatus(value) => ApiError::InvalidStatus(value),
            IssueError::NotResolved => ApiError::NotResolved,
            IssueError::AlreadyAwarded => ApiError::AlreadyAwarded,
            IssueError::Internal(msg) => {
                // 내부 에러는 클라이언트에 상세 정보 노출 안 함
                tracing::error!(reason = %msg, "Repository invariant violated");
                ApiError::InternalError
            }
        }
    }
}
