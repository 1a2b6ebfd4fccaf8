// ==========================================
// 赛事管理系统 - 领域类型定义
// ==========================================
// 职责: 导入实体种类 + 规范化枚举字段
// 序列化格式: SCREAMING_SNAKE_CASE (与后端接口一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 导入实体种类 (Entity Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Player,           // 球员
    FoodRegistration, // 餐食登记
    CommitteeMember,  // 委员会成员
}

impl EntityKind {
    /// 请求体中承载记录数组的字段名
    pub fn payload_key(&self) -> &'static str {
        match self {
            EntityKind::Player => "players",
            EntityKind::FoodRegistration => "registrations",
            EntityKind::CommitteeMember => "members",
        }
    }

    /// 批量导入接口路径（相对 api_base_url）
    pub fn import_path(&self) -> &'static str {
        match self {
            EntityKind::Player => "/players/bulk-import",
            EntityKind::FoodRegistration => "/food-registrations/bulk-import",
            EntityKind::CommitteeMember => "/committee-members/bulk-import",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Player => write!(f, "players"),
            EntityKind::FoodRegistration => write!(f, "food"),
            EntityKind::CommitteeMember => write!(f, "committee"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" | "players" => Ok(EntityKind::Player),
            "food" | "food-registration" | "food-registrations" => {
                Ok(EntityKind::FoodRegistration)
            }
            "committee" | "committee-member" | "committee-members" => {
                Ok(EntityKind::CommitteeMember)
            }
            other => Err(format!(
                "未知导入类型: {}（可选 players / food / committee）",
                other
            )),
        }
    }
}

// ==========================================
// 饮食偏好 (Dietary Preference)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietaryPreference {
    #[default]
    Vegetarian,
    NonVegetarian,
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietaryPreference::Vegetarian => write!(f, "VEGETARIAN"),
            DietaryPreference::NonVegetarian => write!(f, "NON_VEGETARIAN"),
        }
    }
}

// ==========================================
// 场上位置 (Playing Position)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayingPosition {
    #[default]
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl fmt::Display for PlayingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayingPosition::Batsman => write!(f, "BATSMAN"),
            PlayingPosition::Bowler => write!(f, "BOWLER"),
            PlayingPosition::AllRounder => write!(f, "ALL_ROUNDER"),
            PlayingPosition::WicketKeeper => write!(f, "WICKET_KEEPER"),
        }
    }
}

// ==========================================
// 水平等级 (Experience Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "BEGINNER"),
            ExperienceLevel::Intermediate => write!(f, "INTERMEDIATE"),
            ExperienceLevel::Advanced => write!(f, "ADVANCED"),
            ExperienceLevel::Professional => write!(f, "PROFESSIONAL"),
        }
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
            Gender::Other => write!(f, "OTHER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("players".parse::<EntityKind>(), Ok(EntityKind::Player));
        assert_eq!("Food".parse::<EntityKind>(), Ok(EntityKind::FoodRegistration));
        assert_eq!(
            " committee-members ".parse::<EntityKind>(),
            Ok(EntityKind::CommitteeMember)
        );
        assert!("matches".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_enum_serialization_matches_display() {
        let json = serde_json::to_string(&PlayingPosition::AllRounder).unwrap();
        assert_eq!(json, "\"ALL_ROUNDER\"");
        assert_eq!(PlayingPosition::AllRounder.to_string(), "ALL_ROUNDER");

        let json = serde_json::to_string(&DietaryPreference::NonVegetarian).unwrap();
        assert_eq!(json, "\"NON_VEGETARIAN\"");
    }
}
