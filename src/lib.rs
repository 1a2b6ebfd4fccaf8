// ==========================================
// 赛事管理系统 - 批量导入核心库
// ==========================================
// 职责: 表格文件（CSV / Excel）→ 规范记录 → 分批提交到后端
// 实体: 参赛球员 / 餐饮登记 / 组委会成员
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 解码/映射/提交
pub mod importer;

// API 层 - 后端接口客户端
pub mod api;

// 配置层 - 导入配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DietaryPreference, EntityKind, ExperienceLevel, Gender, PlayingPosition};

// 领域实体
pub use domain::{CanonicalRecord, ImportErrorEntry, ImportResult, ImportStage, RawRow};

// 导入管道
pub use importer::{ImportEndpoint, ImportError, ImportObserver, ImportPipeline};

// API
pub use api::{ApiError, CredentialProvider, HttpImportEndpoint};

// 配置
pub use config::{ConfigError, ImportSettings};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "赛事管理系统 - 批量导入";
