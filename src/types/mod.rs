//! Common Types Module
//!
//! 애플리케이션 전반에서 사용되는 공통 타입 정의

use std::fmt;

use serde::{Deserialize, Serialize};

/// 시민 식별 키
///
/// 전화번호가 있으면 전화번호, 없으면 소문자로 변환한 이름.
/// 같은 키는 항상 같은 User 레코드로 해석됨.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 민원 코드 (`FIX-<연도>-<4자리 순번>`)
pub fn format_complaint_id(year: i32, sequence: u64) -> String {
    format!("FIX-{}-{:04}", year, sequence)
}

/// 통화 코드 → 표시 기호
pub fn currency_symbol(currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{} ", other),
    }
}

/// 빈 문자열은 값이 없는 것으로 취급
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_id_padding() {
        assert_eq!(format_complaint_id(2025, 1), "FIX-2025-0001");
        assert_eq!(format_complaint_id(2025, 42), "FIX-2025-0042");
        // 9999 이후에는 자릿수가 늘어날 뿐 잘리지 않음
        assert_eq!(format_complaint_id(2025, 12345), "FIX-2025-12345");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("INR"), "₹");
        assert_eq!(currency_symbol("inr"), "₹");
        assert_eq!(currency_symbol("JPY"), "JPY ");
    }

    #[test]
    fn test_identity_key_serializes_as_plain_string() {
        let key = IdentityKey::new("9999999999");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"9999999999\"");
    }
}
