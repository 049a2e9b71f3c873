//! Aggregation Views
//!
//! Leaderboard and per-citizen summaries, derived on every call from the issue
//! list and user directory. Nothing here is stored.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{Issue, IssueStatus, User};

/// 리더보드 최대 인원
pub const LEADERBOARD_SIZE: usize = 20;

/// 시민 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user: User,
    pub totals: SummaryTotals,
    pub rewards_history: Vec<RewardHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_rewards: f64,
    pub points: f64,
    pub issues_reported: usize,
    pub rewards_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardHistoryEntry {
    pub complaint_id: String,
    pub category: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub status: IssueStatus,
}

/// 포인트 내림차순 상위 20명
///
/// 안정 정렬이므로 동점자는 등록 순서를 유지
pub fn leaderboard<'a>(users: impl Iterator<Item = &'a User>) -> Vec<User> {
    let mut ranked: Vec<User> = users.cloned().collect();
    ranked.sort_by(|a, b| b.points.total_cmp(&a.points));
    ranked.truncate(LEADERBOARD_SIZE);
    ranked
}

/// 시민 요약 (보상 내역은 이슈 저장 순서)
pub fn user_summary(user: &User, issues: &[Issue]) -> UserSummary {
    let reported: Vec<&Issue> = issues
        .iter()
        .filter(|issue| issue.reporter_id == user.id)
        .collect();

    let rewards_history: Vec<RewardHistoryEntry> = reported
        .iter()
        .filter(|issue| issue.reward.awarded)
        .map(|issue| RewardHistoryEntry {
            complaint_id: issue.complaint_id.clone(),
            category: issue.category.clone(),
            amount: issue.reward.amount,
            created_at: issue.created_at,
            status: issue.status,
        })
        .collect();

    UserSummary {
        user: user.clone(),
        totals: SummaryTotals {
            total_rewards: user.total_rewards,
            points: user.points,
            issues_reported: reported.len(),
            rewards_count: rewards_history.len(),
        },
        rewards_history,
    }
}
