//! Reward Engine
//!
//! # Interview Q&A
//!
//! Q: 보상이 두 번 지급되지 않도록 어떻게 보장하는가?
//! A: 검사 → 적용을 하나의 임계 구역에서 수행
//!    1. status == resolved 확인 (아니면 NotResolved)
//!    2. reward.awarded == false 확인 (아니면 AlreadyAwarded)
//!    3. 금액 확정, 이슈/시민 동시 갱신
//!
//!    Database::award가 write lock을 잡은 채로 1~3을 모두 실행하므로
//!    동시 요청 두 개가 모두 2번을 통과할 수 없음
//!
//! Q: 금액을 호출자가 직접 주면?
//! A: 그대로 사용 (관리자 override). 상한 검사는 설정(REWARD_OVERRIDE_LIMIT)으로만 켬

use chrono::{DateTime, Utc};

use crate::db::{Issue, IssueStatus, TimelineEntry, TimelineTag, User};
use crate::error::IssueError;
use crate::types::currency_symbol;

/// 추정 공식 상수
pub const BASE_REWARD: f64 = 20.0;
pub const IMPACT_BOOST: f64 = 40.0;
pub const ENGAGEMENT_CAP: u64 = 20;
pub const MAX_ESTIMATED_REWARD: f64 = 200.0;

/// 영향도 가산점을 받는 카테고리
const HIGH_IMPACT_CATEGORIES: [&str; 2] = ["safety", "water"];

/// 보상 정책
#[derive(Debug, Clone, PartialEq)]
pub struct RewardPolicy {
    pub currency: String,
    /// 직접 지정 금액의 허용 상한 (None = 제한 없음)
    pub override_limit: Option<f64>,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            override_limit: None,
        }
    }
}

impl RewardPolicy {
    /// 지급 금액 결정: 직접 지정 금액 우선, 없으면 추정 공식
    pub fn resolve_amount(&self, issue: &Issue, requested: Option<f64>) -> Result<f64, IssueError> {
        let Some(amount) = requested else {
            return Ok(estimate_reward(issue));
        };

        if let Some(limit) = self.override_limit {
            if !(0.0..=limit).contains(&amount) {
                return Err(IssueError::Validation(format!(
                    "reward amount must be between 0 and {}",
                    limit
                )));
            }
        }
        Ok(amount)
    }
}

/// 보상 추정
///
/// `min(20 + impact + min(upvotes, 20), 200)`
pub fn estimate_reward(issue: &Issue) -> f64 {
    let impact_boost = if HIGH_IMPACT_CATEGORIES.contains(&issue.category.as_str()) {
        IMPACT_BOOST
    } else {
        0.0
    };
    let engagement_boost = issue.upvotes.min(ENGAGEMENT_CAP) as f64;

    (BASE_REWARD + impact_boost + engagement_boost).min(MAX_ESTIMATED_REWARD)
}

/// 지급 전제 조건 검사 (순서대로, 첫 실패가 반환됨)
pub fn check_eligibility(issue: &Issue) -> Result<(), IssueError> {
    if issue.status != IssueStatus::Resolved {
        return Err(IssueError::NotResolved);
    }
    if issue.reward.awarded {
        return Err(IssueError::AlreadyAwarded);
    }
    Ok(())
}

/// 보상 적용
///
/// 호출 전에 `check_eligibility`가 통과했어야 함. 이 함수는 실패하지 않으므로
/// 이슈와 시민 레코드가 함께 갱신되거나 둘 다 그대로 남음
pub fn apply_reward(issue: &mut Issue, reporter: &mut User, amount: f64, at: DateTime<Utc>) {
    issue.reward.amount = amount;
    issue.reward.awarded = true;

    reporter.points += amount;
    reporter.total_rewards += amount;

    issue.timeline.push(TimelineEntry {
        at,
        status: TimelineTag::Rewarded,
        note: format!(
            "Reward of {}{} approved",
            currency_symbol(&issue.reward.currency),
            amount
        ),
    });

    tracing::info!(
        complaint_id = %issue.complaint_id,
        reporter_id = %reporter.id,
        amount,
        "Reward approved"
    );
}
