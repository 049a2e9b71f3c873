//! Category → department routing table.

pub const DEFAULT_DEPARTMENT: &str = "Municipal Corporation";

const DEPARTMENTS: &[(&str, &str)] = &[
    ("roads", "Public Works Department (PWD)"),
    ("road", "Public Works Department (PWD)"),
    ("pothole", "Public Works Department (PWD)"),
    ("water", "Water Supply & Sewerage Board"),
    ("sanitation", "Municipal Sanitation Department"),
    ("garbage", "Municipal Sanitation Department"),
    ("electricity", "Electricity Board"),
    ("streetlight", "Electricity Board"),
    ("safety", "Traffic Police / Municipal Engineering"),
];

/// 카테고리에서 담당 부서 추론 (대소문자 무시, 모르는 카테고리는 기본 부서)
pub fn infer_department(category: &str) -> &'static str {
    let key = category.to_lowercase();
    DEPARTMENTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, department)| *department)
        .unwrap_or(DEFAULT_DEPARTMENT)
}
