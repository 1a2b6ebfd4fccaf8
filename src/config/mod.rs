// ==========================================
// 赛事管理系统 - 配置层
// ==========================================
// 职责: 导入配置加载（TOML 文件 + 环境变量覆盖）
// ==========================================

pub mod import_settings;

// 重导出核心配置
pub use import_settings::{env_keys, ConfigError, ImportSettings, DEFAULT_MAX_FILE_SIZE_BYTES};
