// ==========================================
// 赛事管理系统 - 访问凭证
// ==========================================
// 职责: 向导入接口提供 Bearer Token
// 说明: 登录/会话由外部负责，这里只消费注入的凭证
// ==========================================

use std::env;

/// 默认读取 Token 的环境变量
pub const TOKEN_ENV_VAR: &str = "CRICKET_IMPORT_TOKEN";

/// 凭证提供者
pub trait CredentialProvider: Send + Sync {
    /// 返回 None 时请求不携带 Authorization 头
    fn bearer_token(&self) -> Option<String>;
}

/// 固定 Token
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        let token = self.0.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}

/// 每次请求时从环境变量读取 Token
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl CredentialProvider for EnvTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// 不携带凭证
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_trims_and_rejects_blank() {
        assert_eq!(StaticToken::new(" abc ").bearer_token(), Some("abc".to_string()));
        assert_eq!(StaticToken::new("   ").bearer_token(), None);
    }

    #[test]
    fn test_env_token_provider_reads_named_variable() {
        let var = "CRICKET_IMPORT_TOKEN_TEST_ONLY";
        env::set_var(var, "tok-123");
        assert_eq!(
            EnvTokenProvider::new(var).bearer_token(),
            Some("tok-123".to_string())
        );

        env::remove_var(var);
        assert_eq!(EnvTokenProvider::new(var).bearer_token(), None);
    }

    #[test]
    fn test_no_credentials() {
        assert_eq!(NoCredentials.bearer_token(), None);
    }
}
