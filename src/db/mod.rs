//! Database Module
//!
//! # Interview Q&A
//!
//! Q: 왜 in-memory 저장소인가?
//! A: MVP 범위에서 영속성 보장은 목표가 아님
//!    - 재시작 시 모든 이슈/시민 데이터 소멸 (의도된 범위)
//!    - `IssueRepository` trait 뒤에 있으므로 영속 저장소로 교체 가능
//!
//! Q: 동시성은 어떻게 처리하는가?
//! A: tokio `RwLock` 하나가 이슈 목록과 시민 디렉터리를 함께 보호
//!    - 변경 연산: write lock을 잡은 채 검사 → 변경 전체 수행
//!    - 조회 연산: read lock 아래에서 일관된 스냅샷을 복제해 반환
//!    - 민원 순번도 write lock 안에서 발급 → 저장 순서 = 번호 순서

mod models;
mod repository;

pub use models::*;
pub use repository::{IdentityLookup, IssueFilter, IssueRepository, RepositoryStats, RewardOutcome};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::IssueError;
use crate::services::{
    aggregation, infer_department, lifecycle, reward, AtomicSequence, Clock, ComplaintSequence,
    IdentityResolver, PhoneOrNameResolver, RewardPolicy, SystemClock, UserDirectory, UserSummary,
    ANONYMOUS_CITIZEN,
};
use crate::types::{format_complaint_id, non_empty};

/// 잠금 하나로 보호되는 전체 상태
#[derive(Default)]
struct Ledger {
    issues: Vec<Issue>,
    users: UserDirectory,
}

impl Ledger {
    fn issue_mut(&mut self, id: Uuid) -> Result<&mut Issue, IssueError> {
        self.issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(IssueError::issue_not_found)
    }
}

/// In-memory 이슈 저장소
pub struct Database {
    ledger: RwLock<Ledger>,
    sequence: Arc<dyn ComplaintSequence>,
    identity: Arc<dyn IdentityResolver>,
    clock: Arc<dyn Clock>,
    policy: RewardPolicy,
}

impl Database {
    /// 기본 collaborator(시스템 시간, 1부터 시작하는 순번, 전화/이름 식별)로 생성
    pub fn in_memory(policy: RewardPolicy) -> Self {
        Self {
            ledger: RwLock::new(Ledger::default()),
            sequence: Arc::new(AtomicSequence::new()),
            identity: Arc::new(PhoneOrNameResolver),
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    pub fn with_sequence(mut self, sequence: Arc<dyn ComplaintSequence>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityResolver>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl IssueRepository for Database {
    async fn create_issue(&self, new: NewIssue) -> Result<Issue, IssueError> {
        let (Some(category), Some(description), Some(image_data)) = (
            new.category.filter(|v| !v.is_empty()),
            new.description.filter(|v| !v.is_empty()),
            new.image_data.filter(|v| !v.is_empty()),
        ) else {
            return Err(IssueError::Validation(
                "category, description and imageData are required".to_string(),
            ));
        };

        let name = non_empty(new.reporter_name.as_deref()).unwrap_or(ANONYMOUS_CITIZEN);
        let phone = non_empty(new.reporter_phone.as_deref());
        let key = self
            .identity
            .key_for(Some(name), phone)
            .ok_or_else(|| IssueError::Internal("identity resolver returned no key".to_string()))?;

        let mut ledger = self.ledger.write().await;
        let reporter_id = ledger.users.resolve(key, name, phone).id.clone();

        let now = self.clock.now();
        let complaint_id = format_complaint_id(now.year(), self.sequence.next_value());

        let issue = Issue {
            id: Uuid::new_v4(),
            complaint_id,
            title: new
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| format!("{} issue", category)),
            description,
            department: infer_department(&category).to_string(),
            category,
            location: Location {
                latitude: new.latitude,
                longitude: new.longitude,
                address: new.address.unwrap_or_default(),
                city: new.city.unwrap_or_default(),
            },
            image_data,
            status: IssueStatus::New,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            reporter_id,
            reward: Reward::pending(&self.policy.currency),
            timeline: vec![lifecycle::creation_entry(now)],
        };

        tracing::info!(
            complaint_id = %issue.complaint_id,
            category = %issue.category,
            department = %issue.department,
            reporter_id = %issue.reporter_id,
            "Issue created"
        );

        ledger.issues.push(issue.clone());
        Ok(issue)
    }

    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueError> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn get_issue(&self, id: Uuid) -> Result<Issue, IssueError> {
        let ledger = self.ledger.read().await;
        ledger
            .issues
            .iter()
            .find(|issue| issue.id == id)
            .cloned()
            .ok_or_else(IssueError::issue_not_found)
    }

    async fn get_by_complaint_id(&self, complaint_id: &str) -> Result<Issue, IssueError> {
        let ledger = self.ledger.read().await;
        ledger
            .issues
            .iter()
            .find(|issue| issue.complaint_id == complaint_id)
            .cloned()
            .ok_or_else(|| IssueError::NotFound("Complaint ID".to_string()))
    }

    async fn upvote(&self, id: Uuid) -> Result<Issue, IssueError> {
        let mut ledger = self.ledger.write().await;
        let issue = ledger.issue_mut(id)?;
        issue.upvotes += 1;
        tracing::debug!(complaint_id = %issue.complaint_id, upvotes = issue.upvotes, "Issue upvoted");
        Ok(issue.clone())
    }

    async fn set_status(&self, id: Uuid, status: &str, note: Option<String>) -> Result<Issue, IssueError> {
        let mut ledger = self.ledger.write().await;
        let issue = ledger.issue_mut(id)?;
        let status = lifecycle::parse_status(status)?;

        lifecycle::transition(issue, status, note, self.clock.now());
        Ok(issue.clone())
    }

    async fn award(&self, id: Uuid, amount: Option<f64>) -> Result<RewardOutcome, IssueError> {
        // 검사 → 변경 전체가 write lock 하나 안에서 실행됨
        let mut ledger = self.ledger.write().await;
        let Ledger { issues, users } = &mut *ledger;

        let issue = issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(IssueError::issue_not_found)?;

        if let Err(err) = reward::check_eligibility(issue) {
            tracing::warn!(complaint_id = %issue.complaint_id, reason = %err, "Reward rejected");
            return Err(err);
        }
        let amount = self.policy.resolve_amount(issue, amount)?;

        // 시민 조회 실패 시 아무것도 변경하지 않고 종료
        let reporter = users.get_mut(&issue.reporter_id).ok_or_else(|| {
            IssueError::Internal(format!(
                "reporter {} of {} is missing",
                issue.reporter_id, issue.complaint_id
            ))
        })?;

        reward::apply_reward(issue, reporter, amount, self.clock.now());

        Ok(RewardOutcome {
            issue: issue.clone(),
            reporter: reporter.clone(),
        })
    }

    async fn leaderboard(&self) -> Result<Vec<User>, IssueError> {
        let ledger = self.ledger.read().await;
        Ok(aggregation::leaderboard(ledger.users.iter()))
    }

    async fn user_summary(&self, lookup: &IdentityLookup) -> Result<UserSummary, IssueError> {
        let key = self
            .identity
            .key_for(lookup.name.as_deref(), lookup.phone.as_deref())
            .ok_or_else(|| IssueError::Validation("phone or name is required".to_string()))?;

        let ledger = self.ledger.read().await;
        let user = ledger
            .users
            .get(&key)
            .ok_or_else(|| IssueError::NotFound("Citizen".to_string()))?;

        Ok(aggregation::user_summary(user, &ledger.issues))
    }

    async fn stats(&self) -> Result<RepositoryStats, IssueError> {
        let ledger = self.ledger.read().await;
        Ok(RepositoryStats {
            issues: ledger.issues.len(),
            citizens: ledger.users.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FixedClock;
    use chrono::{TimeZone, Utc};

    fn repository() -> Arc<dyn IssueRepository> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap());
        Arc::new(Database::in_memory(RewardPolicy::default()).with_clock(Arc::new(clock)))
    }

    fn new_issue(category: &str, city: &str, name: &str, phone: &str) -> NewIssue {
        NewIssue {
            category: Some(category.to_string()),
            description: format!("{} problem", category).into(),
            image_data: Some("data:image/jpeg;base64,/9j/4AAQ".to_string()),
            city: Some(city.to_string()),
            reporter_name: Some(name.to_string()),
            reporter_phone: Some(phone.to_string()),
            ..NewIssue::default()
        }
    }

    async fn resolved_issue(repo: &Arc<dyn IssueRepository>, category: &str) -> Issue {
        let issue = repo
            .create_issue(new_issue(category, "Pune", "Asha", "9999999999"))
            .await
            .unwrap();
        repo.set_status(issue.id, "resolved", None).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_defaults() {
        let repo = repository();
        let issue = repo
            .create_issue(new_issue("pothole", "Pune", "Asha", "9999999999"))
            .await
            .unwrap();

        assert_eq!(issue.complaint_id, "FIX-2025-0001");
        assert_eq!(issue.title, "pothole issue");
        assert_eq!(issue.status, IssueStatus::New);
        assert_eq!(issue.department, "Public Works Department (PWD)");
        assert_eq!(issue.upvotes, 0);
        assert_eq!(issue.reward, Reward::pending("INR"));
        assert_eq!(issue.timeline.len(), 1);
        assert_eq!(issue.timeline[0].status, TimelineTag::New);
        assert_eq!(issue.timeline[0].note, lifecycle::CREATED_NOTE);
        assert_eq!(issue.location.city, "Pune");
        assert_eq!(issue.location.address, "");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let repo = repository();
        for strip in ["category", "description", "imageData"] {
            let mut new = new_issue("water", "Pune", "Asha", "1");
            match strip {
                "category" => new.category = Some(String::new()),
                "description" => new.description = None,
                _ => new.image_data = None,
            }
            assert!(matches!(
                repo.create_issue(new).await,
                Err(IssueError::Validation(_))
            ));
        }

        // 검증 실패는 순번을 소비하지 않음
        let issue = repo.create_issue(new_issue("water", "Pune", "Asha", "1")).await.unwrap();
        assert_eq!(issue.complaint_id, "FIX-2025-0001");
        assert_eq!(repo.stats().await.unwrap().issues, 1);
    }

    #[tokio::test]
    async fn test_complaint_ids_unique_and_increasing() {
        let repo = repository();
        let mut previous = 0;
        for i in 0..12 {
            let issue = repo
                .create_issue(new_issue("roads", "Pune", &format!("user{}", i), ""))
                .await
                .unwrap();
            let sequence: u64 = issue.complaint_id.rsplit('-').next().unwrap().parse().unwrap();
            assert!(sequence > previous);
            previous = sequence;
        }
        assert_eq!(previous, 12);
    }

    #[tokio::test]
    async fn test_injected_sequence_is_used() {
        let sequence = Arc::new(AtomicSequence::starting_at(41));
        let repo = Database::in_memory(RewardPolicy::default()).with_sequence(sequence.clone());
        let issue = repo.create_issue(new_issue("roads", "Pune", "Asha", "")).await.unwrap();
        assert!(issue.complaint_id.ends_with("-0041"));

        sequence.reset();
        let issue = repo.create_issue(new_issue("roads", "Pune", "Asha", "")).await.unwrap();
        assert!(issue.complaint_id.ends_with("-0001"));
    }

    #[tokio::test]
    async fn test_same_phone_resolves_to_same_user() {
        let repo = repository();
        let a = repo.create_issue(new_issue("water", "Pune", "Asha", "9999999999")).await.unwrap();
        let b = repo.create_issue(new_issue("roads", "Pune", "Ravi", "9999999999")).await.unwrap();

        assert_eq!(a.reporter_id, b.reporter_id);
        assert_eq!(repo.stats().await.unwrap().citizens, 1);
    }

    #[tokio::test]
    async fn test_injected_identity_strategy() {
        // 이름만으로 식별하는 전략
        struct NameOnly;
        impl IdentityResolver for NameOnly {
            fn key_for(&self, name: Option<&str>, _phone: Option<&str>) -> Option<crate::types::IdentityKey> {
                non_empty(name).map(|n| crate::types::IdentityKey::new(n.to_uppercase()))
            }
        }

        let repo = Database::in_memory(RewardPolicy::default()).with_identity(Arc::new(NameOnly));
        let a = repo.create_issue(new_issue("water", "Pune", "asha", "111")).await.unwrap();
        let b = repo.create_issue(new_issue("water", "Pune", "Asha", "222")).await.unwrap();
        assert_eq!(a.reporter_id.as_str(), "ASHA");
        assert_eq!(a.reporter_id, b.reporter_id);
    }

    #[tokio::test]
    async fn test_anonymous_reporter() {
        let repo = repository();
        let mut new = new_issue("garbage", "Nagpur", "", "");
        new.reporter_name = None;
        let issue = repo.create_issue(new).await.unwrap();
        assert_eq!(issue.reporter_id.as_str(), "anonymous citizen");

        let lookup = IdentityLookup {
            name: Some("Anonymous Citizen".into()),
            phone: None,
        };
        let summary = repo.user_summary(&lookup).await.unwrap();
        assert_eq!(summary.user.name, ANONYMOUS_CITIZEN);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let repo = repository();
        let pune = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        repo.create_issue(new_issue("roads", "Mumbai", "B", "2")).await.unwrap();
        repo.create_issue(new_issue("water", "pune", "C", "3")).await.unwrap();
        repo.set_status(pune.id, "resolved", None).await.unwrap();

        let filter = IssueFilter {
            status: Some("resolved".into()),
            city: Some("PUNE".into()),
            category: None,
        };
        let resolved_in_pune = repo.list_issues(&filter).await.unwrap();
        assert_eq!(resolved_in_pune.len(), 1);
        assert_eq!(resolved_in_pune[0].id, pune.id);

        let all_pune = repo
            .list_issues(&IssueFilter {
                city: Some("Pune".into()),
                ..IssueFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(all_pune.len(), 2);

        assert_eq!(repo.list_issues(&IssueFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_complaint_code() {
        let repo = repository();
        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();

        assert_eq!(repo.get_issue(issue.id).await.unwrap(), issue);
        assert_eq!(repo.get_by_complaint_id("FIX-2025-0001").await.unwrap(), issue);
        assert!(matches!(repo.get_issue(Uuid::new_v4()).await, Err(IssueError::NotFound(_))));
        assert!(matches!(
            repo.get_by_complaint_id("FIX-2025-9999").await,
            Err(IssueError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_upvote_missing_issue_has_no_side_effects() {
        let repo = repository();
        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        repo.upvote(issue.id).await.unwrap();

        assert_eq!(repo.upvote(Uuid::new_v4()).await, Err(IssueError::issue_not_found()));
        assert_eq!(repo.get_issue(issue.id).await.unwrap().upvotes, 1);
    }

    #[tokio::test]
    async fn test_set_status_checks_existence_before_value() {
        let repo = repository();
        assert_eq!(
            repo.set_status(Uuid::new_v4(), "bogus", None).await,
            Err(IssueError::issue_not_found())
        );

        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        assert_eq!(
            repo.set_status(issue.id, "bogus", None).await,
            Err(IssueError::InvalidStatus("bogus".to_string()))
        );
        // 실패한 전이는 타임라인을 건드리지 않음
        assert_eq!(repo.get_issue(issue.id).await.unwrap().timeline.len(), 1);
    }

    #[tokio::test]
    async fn test_award_before_resolved_fails() {
        let repo = repository();
        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        repo.set_status(issue.id, "in_progress", None).await.unwrap();

        assert_eq!(repo.award(issue.id, Some(50.0)).await, Err(IssueError::NotResolved));
        let stored = repo.get_issue(issue.id).await.unwrap();
        assert!(!stored.reward.awarded);
        assert_eq!(stored.reward.amount, 0.0);
    }

    #[tokio::test]
    async fn test_award_explicit_amount_once() {
        let repo = repository();
        let issue = resolved_issue(&repo, "roads").await;

        let outcome = repo.award(issue.id, Some(75.0)).await.unwrap();
        assert_eq!(outcome.issue.reward.amount, 75.0);
        assert!(outcome.issue.reward.awarded);
        assert_eq!(outcome.reporter.points, 75.0);
        assert_eq!(outcome.reporter.total_rewards, 75.0);

        assert_eq!(repo.award(issue.id, Some(10.0)).await, Err(IssueError::AlreadyAwarded));
        let stored = repo.get_issue(issue.id).await.unwrap();
        assert_eq!(stored.reward.amount, 75.0);

        let board = repo.leaderboard().await.unwrap();
        assert_eq!(board[0].points, 75.0);
    }

    #[tokio::test]
    async fn test_award_estimates_when_no_amount() {
        let repo = repository();
        let issue = repo.create_issue(new_issue("water", "Pune", "A", "1")).await.unwrap();
        for _ in 0..5 {
            repo.upvote(issue.id).await.unwrap();
        }
        repo.set_status(issue.id, "resolved", None).await.unwrap();

        let outcome = repo.award(issue.id, None).await.unwrap();
        assert_eq!(outcome.issue.reward.amount, 65.0);
        assert_eq!(outcome.issue.status, IssueStatus::Resolved);
        assert_eq!(outcome.issue.timeline.last().unwrap().status, TimelineTag::Rewarded);
    }

    #[tokio::test]
    async fn test_award_missing_reporter_leaves_issue_untouched() {
        let repo = Database::in_memory(RewardPolicy::default());
        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        repo.set_status(issue.id, "resolved", None).await.unwrap();

        // reporter_id를 존재하지 않는 값으로 바꿔 불변식 위반 상태를 만듦
        {
            let mut ledger = repo.ledger.write().await;
            ledger.issues[0].reporter_id = crate::types::IdentityKey::new("ghost");
        }

        assert!(matches!(repo.award(issue.id, None).await, Err(IssueError::Internal(_))));
        let stored = repo.get_issue(issue.id).await.unwrap();
        assert!(!stored.reward.awarded);
        assert_eq!(stored.timeline.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_awards_pay_once() {
        let repo = repository();
        let issue = resolved_issue(&repo, "safety").await;

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.award(issue.id, Some(10.0)).await })
            })
            .collect();

        let mut paid = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => paid += 1,
                Err(err) => assert_eq!(err, IssueError::AlreadyAwarded),
            }
        }
        assert_eq!(paid, 1);

        let board = repo.leaderboard().await.unwrap();
        assert_eq!(board[0].total_rewards, 10.0);
    }

    #[tokio::test]
    async fn test_override_limit_is_enforced() {
        let policy = RewardPolicy {
            override_limit: Some(100.0),
            ..RewardPolicy::default()
        };
        let repo = Database::in_memory(policy);
        let issue = repo.create_issue(new_issue("roads", "Pune", "A", "1")).await.unwrap();
        repo.set_status(issue.id, "resolved", None).await.unwrap();

        assert!(matches!(
            repo.award(issue.id, Some(1000.0)).await,
            Err(IssueError::Validation(_))
        ));
        assert!(!repo.get_issue(issue.id).await.unwrap().reward.awarded);
        assert_eq!(repo.award(issue.id, Some(100.0)).await.unwrap().issue.reward.amount, 100.0);
    }

    #[tokio::test]
    async fn test_user_summary_errors() {
        let repo = repository();
        assert!(matches!(
            repo.user_summary(&IdentityLookup::default()).await,
            Err(IssueError::Validation(_))
        ));
        let lookup = IdentityLookup {
            phone: Some("0000000000".into()),
            name: None,
        };
        assert_eq!(
            repo.user_summary(&lookup).await,
            Err(IssueError::NotFound("Citizen".to_string()))
        );
    }

    #[tokio::test]
    async fn test_pothole_scenario_end_to_end() {
        let repo = repository();
        let issue = repo
            .create_issue(new_issue("pothole", "Pune", "Asha", "9876543210"))
            .await
            .unwrap();
        assert_eq!(issue.department, "Public Works Department (PWD)");

        for _ in 0..10 {
            repo.upvote(issue.id).await.unwrap();
        }
        repo.set_status(issue.id, "in_progress", None).await.unwrap();
        repo.set_status(issue.id, "resolved", Some("patched".into())).await.unwrap();

        let outcome = repo.award(issue.id, None).await.unwrap();
        assert_eq!(outcome.issue.reward.amount, 30.0);
        assert_eq!(outcome.issue.timeline.len(), 4);

        let lookup = IdentityLookup {
            phone: Some("9876543210".into()),
            name: None,
        };
        let summary = repo.user_summary(&lookup).await.unwrap();
        assert_eq!(summary.totals.issues_reported, 1);
        assert_eq!(summary.totals.rewards_count, 1);
        assert_eq!(summary.totals.total_rewards, 30.0);
        assert_eq!(summary.rewards_history[0].complaint_id, issue.complaint_id);
    }
}
