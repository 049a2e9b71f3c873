//! Lifecycle State Machine
//!
//! # Interview Q&A
//!
//! Q: 상태 전이 그래프는?
//! A: 제한 없음. new / in_progress / resolved / rejected 사이 어느 방향이든 허용
//!    - 상태는 "라벨"이고, 실제 게이트는 보상 지급(resolved 필수) 한 곳뿐
//!    - resolved → new 같은 되돌리기도 허용 (의도된 선택, 테스트로 고정)
//!
//! Q: 같은 상태로 다시 바꾸면?
//! A: 에러가 아니라 타임라인에 항목이 하나 더 쌓임 (감사 기록)

use chrono::{DateTime, Utc};

use crate::db::{Issue, IssueStatus, TimelineEntry, TimelineTag};
use crate::error::IssueError;

pub const CREATED_NOTE: &str = "Issue created by citizen";

/// 문자열 상태 값 검증
pub fn parse_status(raw: &str) -> Result<IssueStatus, IssueError> {
    raw.parse()
}

/// 생성 시점 타임라인 항목
pub fn creation_entry(at: DateTime<Utc>) -> TimelineEntry {
    TimelineEntry {
        at,
        status: TimelineTag::New,
        note: CREATED_NOTE.to_string(),
    }
}

/// 상태 전이 적용
///
/// status 설정, updated_at 갱신, 타임라인 항목 추가
pub fn transition(issue: &mut Issue, status: IssueStatus, note: Option<String>, at: DateTime<Utc>) {
    let previous = issue.status;
    issue.status = status;
    issue.updated_at = at;
    issue.timeline.push(TimelineEntry {
        at,
        status: status.into(),
        note: note.unwrap_or_default(),
    });

    tracing::info!(
        complaint_id = %issue.complaint_id,
        from = %previous,
        to = %status,
        "Issue status changed"
    );
}
