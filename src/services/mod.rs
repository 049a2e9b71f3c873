//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `identity`: 시민 식별 키 결정 및 User 레코드 관리
//! - `lifecycle`: 상태 전이 및 타임라인 기록
//! - `reward`: 보상 금액 추정 및 1회 지급 규칙
//! - `aggregation`: 리더보드 / 시민 요약
//! - `department`: 카테고리 → 담당 부서
//! - `sequence`, `clock`: 주입 가능한 민원 순번 / 시간

pub mod aggregation;
pub mod clock;
pub mod department;
pub mod identity;
pub mod lifecycle;
pub mod reward;
pub mod sequence;

pub use aggregation::{RewardHistoryEntry, SummaryTotals, UserSummary, LEADERBOARD_SIZE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use department::infer_department;
pub use identity::{IdentityResolver, PhoneOrNameResolver, UserDirectory, ANONYMOUS_CITIZEN};
pub use reward::{estimate_reward, RewardPolicy};
pub use sequence::{AtomicSequence, ComplaintSequence};
