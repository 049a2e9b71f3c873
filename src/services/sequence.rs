//! Complaint Sequence
//!
//! # Interview Q&A
//!
//! Q: 민원 번호를 왜 별도 collaborator로 분리했는가?
//! A: 전역 카운터를 그대로 두면 테스트 순서에 따라 번호가 달라짐
//!    - trait으로 주입 → 테스트마다 새 시퀀스 또는 reset()
//!    - 프로세스 수명 동안 번호는 재사용되지 않음 (삭제 기능 없음)
//!
//! Q: 동시 요청에서 번호 중복은?
//! A: AtomicU64::fetch_add 하나로 발급 → 락 없이도 유일성 보장

use std::sync::atomic::{AtomicU64, Ordering};

/// 민원 순번 발급기
pub trait ComplaintSequence: Send + Sync {
    /// 다음 순번 발급 (1부터 시작, 단조 증가)
    fn next_value(&self) -> u64;

    /// 처음(1)으로 되돌림. 운영 코드에서는 호출하지 않음
    fn reset(&self);
}

#[derive(Debug)]
pub struct AtomicSequence {
    next: AtomicU64,
}

impl AtomicSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplaintSequence for AtomicSequence {
    fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    fn reset(&self) {
        self.next.store(1, Ordering::SeqCst);
    }
}
