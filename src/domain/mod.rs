// ==========================================
// 赛事管理系统 - 领域模型层
// ==========================================
// 职责: 定义导入实体、规范化枚举、批次与结果
// 红线: 不含文件解析逻辑，不含网络逻辑
// ==========================================

pub mod import;
pub mod record;
pub mod types;

// 重导出核心类型
pub use import::{BatchOutcome, ImportBatch, ImportErrorEntry, ImportResult, ImportStage};
pub use record::{
    CanonicalRecord, CommitteeMemberRecord, FoodRegistrationRecord, PlayerRecord, RawRow,
};
pub use types::{DietaryPreference, EntityKind, ExperienceLevel, Gender, PlayingPosition};
