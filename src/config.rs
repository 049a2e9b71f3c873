//! Configuration Module
//!
//! # Interview Q&A
//!
//! Q: 환경변수 vs 설정 파일, 어떤 방식을 선택했고 왜인가?
//! A: 환경변수를 선택
//!    - 12-Factor App 원칙 준수
//!    - Docker/K8s 배포 시 환경별 설정 분리 용이
//!    - `.env` 파일은 dotenvy로 개발 환경에서만 로드
//!
//! Q: 설정 검증은 어떻게 하는가?
//! A: from_env()에서 숫자 값 파싱 실패 시 즉시 실패 (fail-fast)
//!    - 앱 시작 시점에 모든 설정 검증
//!    - 테스트는 `from_lookup()`에 HashMap을 넘겨 환경변수와 분리

use std::env;
use anyhow::{bail, Context, Result};

use crate::services::RewardPolicy;

/// 기본 요청 본문 제한 (이미지가 base64로 인라인 전송됨)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (기본값: 4000)
    pub port: u16,

    /// 보상 통화 코드 (기본값: INR)
    pub reward_currency: String,

    /// 관리자가 직접 지정한 보상 금액의 상한
    /// None이면 호출자가 준 금액을 그대로 신뢰
    pub reward_override_limit: Option<f64>,

    /// JSON 본문 최대 크기
    pub body_limit_bytes: usize,

    /// 프로덕션 CORS 허용 origin 목록
    pub allowed_origins: Vec<String>,

    /// 환경 (development, staging, production)
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            reward_currency: "INR".to_string(),
            reward_override_limit: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            allowed_origins: Vec::new(),
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// # Optional Environment Variables
    ///
    /// - `PORT`: 서버 포트 (기본값: 4000)
    /// - `ENVIRONMENT`: development | staging | production
    /// - `REWARD_CURRENCY`: 보상 통화 (기본값: INR)
    /// - `REWARD_OVERRIDE_LIMIT`: 직접 지정 보상 금액 상한 (없으면 무제한)
    /// - `BODY_LIMIT_BYTES`: 요청 본문 제한 (기본값: 10 MiB)
    /// - `ALLOWED_ORIGINS`: 프로덕션 CORS origin (쉼표 구분)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 key → value 조회 함수로 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let environment = match lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };

        let reward_override_limit = match lookup("REWARD_OVERRIDE_LIMIT") {
            Some(raw) => {
                let limit: f64 = raw
                    .parse()
                    .context("REWARD_OVERRIDE_LIMIT must be a number")?;
                if !limit.is_finite() || limit < 0.0 {
                    bail!("REWARD_OVERRIDE_LIMIT must be a non-negative number");
                }
                Some(limit)
            }
            None => None,
        };

        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(raw) => raw.parse().context("BODY_LIMIT_BYTES must be a valid number")?,
            None => defaults.body_limit_bytes,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            port,
            reward_currency: lookup("REWARD_CURRENCY")
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.reward_currency),
            reward_override_limit,
            body_limit_bytes,
            allowed_origins,
            environment,
        })
    }

    /// 보상 엔진 정책
    pub fn reward_policy(&self) -> RewardPolicy {
        RewardPolicy {
            currency: self.reward_currency.clone(),
            override_limit: self.reward_override_limit,
        }
    }

    /// 프로덕션 환경인지 확인
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
