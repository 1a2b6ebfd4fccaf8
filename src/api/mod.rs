// ==========================================
// 赛事管理系统 - API 层
// ==========================================
// 职责: 调用后端批量导入接口（reqwest），提供访问凭证
// ==========================================

pub mod credentials;
pub mod error;
pub mod import_client;

// 重导出核心类型
pub use credentials::{CredentialProvider, EnvTokenProvider, NoCredentials, StaticToken, TOKEN_ENV_VAR};
pub use error::{ApiError, ApiResult};
pub use import_client::HttpImportEndpoint;
