//! Database Models
//!
//! Issue and citizen records held by the repository.
//! All records serialize with camelCase field names, matching the public JSON API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IssueError;
use crate::types::IdentityKey;

/// 이슈 상태
///
/// 네 가지 상태 사이의 전이는 제한 없음 (services::lifecycle 참고)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    New,
    InProgress,
    Resolved,
    Rejected,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::New,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Rejected,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| IssueError::InvalidStatus(s.to_string()))
    }
}

/// 타임라인 태그: 상태 변경 또는 보상 이벤트
///
/// `Rewarded`는 상태가 아니라 이벤트 태그일 뿐이며 이슈의 status는 바꾸지 않음
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineTag {
    New,
    InProgress,
    Resolved,
    Rejected,
    Rewarded,
}

impl From<IssueStatus> for TimelineTag {
    fn from(status: IssueStatus) -> Self {
        match status {
            IssueStatus::New => TimelineTag::New,
            IssueStatus::InProgress => TimelineTag::InProgress,
            IssueStatus::Resolved => TimelineTag::Resolved,
            IssueStatus::Rejected => TimelineTag::Rejected,
        }
    }
}

/// 타임라인 항목 (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub status: TimelineTag,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
    pub city: String,
}

/// 보상 정보
///
/// `awarded`는 false → true로 단 한 번만 바뀜
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub amount: f64,
    pub currency: String,
    pub awarded: bool,
}

impl Reward {
    pub fn pending(currency: &str) -> Self {
        Self {
            amount: 0.0,
            currency: currency.to_string(),
            awarded: false,
        }
    }
}

/// 시민이 신고한 이슈
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Uuid,
    /// 사람이 읽는 민원 코드 (FIX-2025-0001)
    pub complaint_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: Location,
    /// base64 이미지 (불투명 문자열로만 취급)
    pub image_data: String,
    pub status: IssueStatus,
    /// 생성 시 카테고리에서 한 번만 추론
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub upvotes: u64,
    pub reporter_id: IdentityKey,
    pub reward: Reward,
    pub timeline: Vec<TimelineEntry>,
}

/// 시민 (신고자)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: IdentityKey,
    pub name: String,
    pub phone: Option<String>,
    /// 누적 포인트
    pub points: f64,
    /// 누적 보상 금액
    pub total_rewards: f64,
}

/// 이슈 생성 입력
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub image_data: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_phone: Option<String>,
}
