// ==========================================
// 赛事管理系统 - 导入记录实体
// ==========================================
// RawRow: 解码后的原始行（表头 → 原始值）
// CanonicalRecord: 规范化后、可提交后端的记录
// ==========================================

use crate::domain::types::{
    DietaryPreference, EntityKind, ExperienceLevel, Gender, PlayingPosition,
};
use serde::{Deserialize, Serialize};

// ==========================================
// RawRow - 原始行
// ==========================================
// 单元格按文件列顺序保存，键的遍历顺序即表头顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    row_number: usize,
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// 创建原始行
    ///
    /// # 参数
    /// - row_number: 面向用户的行号（含表头，从 1 开始）
    /// - cells: (表头, 原始值) 列表
    pub fn new(row_number: usize, cells: Vec<(String, String)>) -> Self {
        Self { row_number, cells }
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// 精确匹配表头（区分大小写）
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// 按列顺序遍历 (表头, 值)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 所有单元格均为空白
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

// ==========================================
// 球员记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub full_name: String,
    pub email: String,
    pub trainee_id: String,
    pub phone: String,
    pub gender: Gender,
    pub playing_position: PlayingPosition,
    pub experience_level: ExperienceLevel,
    pub department: String,
    pub row_number: usize,
}

// ==========================================
// 餐食登记记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRegistrationRecord {
    pub full_name: String,
    pub email: String,
    pub trainee_id: String,
    pub phone: String,
    pub gender: Gender,
    pub dietary_preference: DietaryPreference,
    pub special_requirements: String,
    pub row_number: usize,
}

// ==========================================
// 委员会成员记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeMemberRecord {
    pub full_name: String,
    pub email: String,
    pub trainee_id: String,
    pub phone: String,
    pub role: String,
    pub department: String,
    pub row_number: usize,
}

// ==========================================
// CanonicalRecord - 规范化记录
// ==========================================
// 序列化时不带标签，直接输出对应实体的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    Player(PlayerRecord),
    FoodRegistration(FoodRegistrationRecord),
    CommitteeMember(CommitteeMemberRecord),
}

impl CanonicalRecord {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            CanonicalRecord::Player(_) => EntityKind::Player,
            CanonicalRecord::FoodRegistration(_) => EntityKind::FoodRegistration,
            CanonicalRecord::CommitteeMember(_) => EntityKind::CommitteeMember,
        }
    }

    pub fn row_number(&self) -> usize {
        match self {
            CanonicalRecord::Player(r) => r.row_number,
            CanonicalRecord::FoodRegistration(r) => r.row_number,
            CanonicalRecord::CommitteeMember(r) => r.row_number,
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            CanonicalRecord::Player(r) => &r.full_name,
            CanonicalRecord::FoodRegistration(r) => &r.full_name,
            CanonicalRecord::CommitteeMember(r) => &r.full_name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            CanonicalRecord::Player(r) => &r.email,
            CanonicalRecord::FoodRegistration(r) => &r.email,
            CanonicalRecord::CommitteeMember(r) => &r.email,
        }
    }

    pub fn trainee_id(&self) -> &str {
        match self {
            CanonicalRecord::Player(r) => &r.trainee_id,
            CanonicalRecord::FoodRegistration(r) => &r.trainee_id,
            CanonicalRecord::CommitteeMember(r) => &r.trainee_id,
        }
    }

    /// 至少一个标识字段（姓名/邮箱/学员编号）非空
    pub fn has_identity(&self) -> bool {
        !(self.full_name().is_empty() && self.email().is_empty() && self.trainee_id().is_empty())
    }
}
