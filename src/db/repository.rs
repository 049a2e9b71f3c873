//! Repository Pattern Implementation
//!
//! # Interview Q&A
//!
//! Q: Repository 패턴이란?
//! A: 데이터 접근 로직을 추상화하는 패턴
//!
//!    장점:
//!    - 비즈니스 로직과 데이터 접근 분리
//!    - 라우트는 `Arc<dyn IssueRepository>`만 알면 됨
//!    - 저장소 교체 시 영향 최소화
//!
//! Q: 왜 메서드가 "연산" 단위인가? (insert/update 단위가 아니라)
//! A: 보상 지급처럼 검사 → 변경이 한 번에 일어나야 하는 연산이 있음
//!    - 구현체가 자신의 잠금/트랜잭션 안에서 연산 전체를 수행
//!    - 호출자가 중간 상태를 관찰할 수 없음
//!
//! 현재 구현체는 in-memory `Database` 하나 (재시작 시 데이터 소멸은 의도된 범위)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Issue, NewIssue, User};
use crate::error::IssueError;
use crate::services::UserSummary;
use crate::types::non_empty;

/// 이슈 목록 필터 (모든 조건 AND)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
}

impl IssueFilter {
    /// 빈 문자열 조건은 없는 것으로 취급
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(status) = non_empty(self.status.as_deref()) {
            if issue.status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            if issue.category != category {
                return false;
            }
        }
        if let Some(city) = non_empty(self.city.as_deref()) {
            if issue.location.city.to_lowercase() != city.to_lowercase() {
                return false;
            }
        }
        true
    }
}

/// 시민 조회 조건 (전화번호 또는 이름)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityLookup {
    pub phone: Option<String>,
    pub name: Option<String>,
}

/// 보상 지급 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardOutcome {
    pub issue: Issue,
    pub reporter: User,
}

/// 저장소 통계 (health check용)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepositoryStats {
    pub issues: usize,
    pub citizens: usize,
}

/// 이슈 / 시민 저장소 인터페이스
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// 이슈 생성 (category, description, imageData 필수)
    async fn create_issue(&self, new: NewIssue) -> Result<Issue, IssueError>;

    /// 필터에 맞는 전체 목록 (저장 순서)
    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueError>;

    async fn get_issue(&self, id: Uuid) -> Result<Issue, IssueError>;

    async fn get_by_complaint_id(&self, complaint_id: &str) -> Result<Issue, IssueError>;

    async fn upvote(&self, id: Uuid) -> Result<Issue, IssueError>;

    /// 상태 변경. 이슈 존재 여부를 먼저 확인한 뒤 상태 값 검증
    async fn set_status(&self, id: Uuid, status: &str, note: Option<String>) -> Result<Issue, IssueError>;

    /// 보상 지급 (금액 없으면 추정 공식)
    async fn award(&self, id: Uuid, amount: Option<f64>) -> Result<RewardOutcome, IssueError>;

    /// 포인트 상위 시민
    async fn leaderboard(&self) -> Result<Vec<User>, IssueError>;

    async fn user_summary(&self, lookup: &IdentityLookup) -> Result<UserSummary, IssueError>;

    async fn stats(&self) -> Result<RepositoryStats, IssueError>;
}
