// ==========================================
// 赛事管理系统 - API 层错误类型
// ==========================================
// 职责: 批量导入接口调用失败的原因（网络 / HTTP 状态 / 响应格式）
// 说明: 这些错误不会终止导入，由 BatchSubmitter 折叠为整批失败
// ==========================================

use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP 客户端初始化失败: {0}")]
    ClientBuild(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("响应格式错误: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
