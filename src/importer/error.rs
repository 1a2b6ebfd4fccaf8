// ==========================================
// 赛事管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 此处仅包含解码阶段的致命错误；
//       批次失败与行级错误折叠进 ImportResult，不在此列
// ==========================================

use thiserror::Error;

/// 导入模块错误类型（致命，出现即终止本次导入）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件无可导入的数据行")]
    EmptyFile,

    #[error("文件解析失败: {0}")]
    ParseError(String),

    #[error("文件过大: {size} 字节（上限 {limit} 字节）")]
    FileTooLarge { size: u64, limit: u64 },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type DecodeResult<T> = Result<T, ImportError>;
