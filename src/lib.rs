//! NagarSeva Civic Issue API Library
//!
//! # Overview
//!
//! 시민이 사진과 위치로 생활 민원을 신고하고, 지자체 부서가 처리하며,
//! 해결된 신고에는 보상이 지급되는 플랫폼의 백엔드.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌──────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │→ │    DB    │→ │Services │  │  Types  │    │
//! │  │ (axum)  │  │(Database)│  │lifecycle│  │         │    │
//! │  └─────────┘  └──────────┘  │ reward  │  └─────────┘    │
//! │                             │identity │                  │
//! │                             └─────────┘                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 상태 전이, 보상, 신원, 집계 로직
//! - `db`: 이슈 저장소 (in-memory)
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nagarseva_api::{config::Config, db::Database, routes, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::in_memory(config.reward_policy());
//!     let app = routes::create_router(AppState {
//!         repo: Arc::new(db),
//!         config: Arc::new(config),
//!     });
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod db;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{ApiError, IssueError};
pub use db::{Database, IssueRepository};

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn IssueRepository>,
    pub config: Arc<Config>,
}
