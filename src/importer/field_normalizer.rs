// ==========================================
// 赛事管理系统 - 字段规范化
// ==========================================
// 职责: 自由文本 → 规范枚举（子串启发式 + 安全默认值）
// 红线: 所有 normalize_* 均为全函数，任何输入都返回合法枚举值
// classify_* 在无法识别时返回 None，供调用方记录静默回退
// ==========================================

use crate::domain::types::{DietaryPreference, ExperienceLevel, Gender, PlayingPosition};
use chrono::{DateTime, Utc};

// ==========================================
// 饮食偏好
// ==========================================

/// 识别饮食偏好（不含默认值）
///
/// 注意: 没有 VEGAN 分支，"Vegan" 会被识别为 VEGETARIAN
pub fn classify_dietary(raw: &str) -> Option<DietaryPreference> {
    let value = raw.trim().to_uppercase().replace(|c: char| c == ' ' || c == '-', "_");

    if ["NON", "MEAT", "CHICKEN", "FISH"]
        .iter()
        .any(|k| value.contains(k))
    {
        Some(DietaryPreference::NonVegetarian)
    } else if value.contains("VEG") {
        Some(DietaryPreference::Vegetarian)
    } else {
        None
    }
}

pub fn normalize_dietary(raw: &str) -> DietaryPreference {
    classify_dietary(raw).unwrap_or_default()
}

// ==========================================
// 场上位置
// ==========================================

/// 识别场上位置
///
/// 检查顺序不可调整: 全能型先于投球/击球判断
pub fn classify_position(raw: &str) -> Option<PlayingPosition> {
    let value = raw.trim().to_uppercase();

    if value.contains("ALL") || value.contains("ROUNDER") {
        Some(PlayingPosition::AllRounder)
    } else if value.contains("BOWL") {
        Some(PlayingPosition::Bowler)
    } else if value.contains("WICKET") || value.contains("KEEPER") {
        Some(PlayingPosition::WicketKeeper)
    } else if value.contains("BAT") {
        Some(PlayingPosition::Batsman)
    } else {
        None
    }
}

pub fn normalize_position(raw: &str) -> PlayingPosition {
    classify_position(raw).unwrap_or_default()
}

// ==========================================
// 水平等级
// ==========================================
pub fn classify_experience(raw: &str) -> Option<ExperienceLevel> {
    let value = raw.trim().to_uppercase();

    // "PROFESSIONAL" 本身包含 "PRO"
    if value.contains("PRO") {
        Some(ExperienceLevel::Professional)
    } else if value.contains("ADVANCED") || value.contains("EXPERT") {
        Some(ExperienceLevel::Advanced)
    } else if value.contains("INTERMEDIATE") || value.contains("MEDIUM") {
        Some(ExperienceLevel::Intermediate)
    } else if value.contains("BEGINNER") {
        Some(ExperienceLevel::Beginner)
    } else {
        None
    }
}

pub fn normalize_experience(raw: &str) -> ExperienceLevel {
    classify_experience(raw).unwrap_or_default()
}

// ==========================================
// 性别
// ==========================================
pub fn classify_gender(raw: &str) -> Option<Gender> {
    let value = raw.trim().to_uppercase();

    // FEMALE 包含 MALE，必须先判断
    if value.contains("FEMALE") || value.contains("WOMAN") || value == "F" {
        Some(Gender::Female)
    } else if value.contains("OTHER") {
        Some(Gender::Other)
    } else if value.contains("MALE") || value.contains("MAN") || value == "M" {
        Some(Gender::Male)
    } else {
        None
    }
}

pub fn normalize_gender(raw: &str) -> Gender {
    classify_gender(raw).unwrap_or_default()
}

// ==========================================
// 学员编号（仅球员）
// ==========================================

/// 生成学员编号
///
/// # 规则
/// - 邮箱含 '@' → 取本地部分，转大写并去除所有非字母数字字符
/// - 否则 → TRN{导入开始时间戳毫秒}{行号}，同一次导入内不重复
pub fn derive_trainee_id(email: &str, started_at: DateTime<Utc>, row_number: usize) -> String {
    if let Some((local, _)) = email.trim().split_once('@') {
        let id: String = local
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();
        if !id.is_empty() {
            return id;
        }
    }

    format!("TRN{}{}", started_at.timestamp_millis(), row_number)
}
