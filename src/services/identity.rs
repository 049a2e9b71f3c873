//! Identity Resolver
//!
//! 인증 없이 시민이 스스로 밝힌 이름/전화번호로 User 레코드를 찾거나 만든다.
//!
//! # Interview Q&A
//!
//! Q: 키 결정 전략을 trait으로 둔 이유는?
//! A: 지금은 "전화번호, 없으면 소문자 이름"이지만
//!    - 추후 인증된 계정 ID로 바꿀 때 lifecycle/reward 로직은 손대지 않음
//!    - UserDirectory는 키만 받으므로 전략과 저장소가 분리됨

use std::collections::HashMap;

use crate::db::User;
use crate::types::{non_empty, IdentityKey};

/// 이름이 없을 때 사용하는 기본 이름
pub const ANONYMOUS_CITIZEN: &str = "Anonymous Citizen";

/// 신원 키 결정 전략
pub trait IdentityResolver: Send + Sync {
    /// (이름, 전화번호) → 키. 둘 다 없으면 None
    fn key_for(&self, name: Option<&str>, phone: Option<&str>) -> Option<IdentityKey>;
}

/// 전화번호 우선, 없으면 소문자 이름
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneOrNameResolver;

impl IdentityResolver for PhoneOrNameResolver {
    fn key_for(&self, name: Option<&str>, phone: Option<&str>) -> Option<IdentityKey> {
        if let Some(phone) = non_empty(phone) {
            return Some(IdentityKey::new(phone));
        }
        non_empty(name).map(|name| IdentityKey::new(name.to_lowercase()))
    }
}

/// 시민 레코드 저장소 (삽입 순서 유지)
///
/// User 레코드의 유일한 소유자. 레코드는 삭제되지 않음
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    index: HashMap<IdentityKey, usize>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키에 해당하는 User를 반환, 없으면 0 포인트로 생성
    ///
    /// 같은 키로 다시 호출하면 복사본이 아닌 같은 레코드를 돌려줌
    pub fn resolve(&mut self, key: IdentityKey, name: &str, phone: Option<&str>) -> &mut User {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                tracing::debug!(user_id = %key, "Registering new citizen");
                self.users.push(User {
                    id: key.clone(),
                    name: name.to_string(),
                    phone: non_empty(phone).map(String::from),
                    points: 0.0,
                    total_rewards: 0.0,
                });
                let position = self.users.len() - 1;
                self.index.insert(key, position);
                position
            }
        };
        &mut self.users[position]
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&User> {
        self.index.get(key).map(|&position| &self.users[position])
    }

    pub fn get_mut(&mut self, key: &IdentityKey) -> Option<&mut User> {
        let position = *self.index.get(key)?;
        self.users.get_mut(position)
    }

    /// 삽입 순서대로 순회
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
