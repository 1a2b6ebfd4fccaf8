// ==========================================
// 赛事管理系统 - 导入配置
// ==========================================
// 来源优先级: 环境变量 > 配置文件 (TOML) > 默认值
// 默认路径: <用户配置目录>/cricket-import/config.toml
// ==========================================

use crate::importer::batch_submitter::DEFAULT_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// 配置相关环境变量
pub mod env_keys {
    pub const API_BASE_URL: &str = "CRICKET_IMPORT_API_BASE_URL";
    pub const BATCH_SIZE: &str = "CRICKET_IMPORT_BATCH_SIZE";
    pub const REQUEST_TIMEOUT_SECS: &str = "CRICKET_IMPORT_REQUEST_TIMEOUT_SECS";
}

/// 默认文件大小上限: 5 MiB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    Invalid {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ImportSettings
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 每批记录数
    pub batch_size: usize,
    /// 是否让后端跳过重复记录
    pub skip_duplicates: bool,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 上传文件大小上限（字节）
    pub max_file_size_bytes: u64,
    /// 汇总中展示的错误条数上限
    pub max_reported_errors: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            skip_duplicates: true,
            request_timeout_secs: 30,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_reported_errors: 20,
        }
    }
}

impl ImportSettings {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cricket-import").join("config.toml"))
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: ImportSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 读取配置文件，再应用环境变量覆盖
    ///
    /// # 参数
    /// - path: 显式指定的配置文件（不存在时返回 ConfigError::Read）；
    ///   None 时使用默认路径，默认文件不存在则使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            // 显式指定的文件必须存在
            Some(p) => Self::read_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::read_file(&p)?,
                _ => ImportSettings::default(),
            },
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "读取配置文件");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// 应用环境变量覆盖
    ///
    /// lookup 以参数形式传入，便于测试
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env_keys::API_BASE_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }

        if let Some(raw) = lookup(env_keys::BATCH_SIZE) {
            self.batch_size = parse_number(env_keys::BATCH_SIZE, &raw)?;
        }

        if let Some(raw) = lookup(env_keys::REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs = parse_number(env_keys::REQUEST_TIMEOUT_SECS, &raw)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid {
                key: "batch_size".to_string(),
                value: "0".to_string(),
                message: "批次大小必须大于 0".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs".to_string(),
                value: "0".to_string(),
                message: "请求超时必须大于 0 秒".to_string(),
            });
        }

        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "api_base_url".to_string(),
                value: String::new(),
                message: "API 地址不能为空".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        message: "不是有效的数字".to_string(),
    })
}
