// ==========================================
// 赛事管理系统 - 批量导入接口客户端
// ==========================================
// 接口: POST {api_base_url}{import_path}
// 请求: { <payload_key>: [...], skipDuplicates }
// 成功: { data: { imported, failed, skipped, errors: [{rowNumber, error} | string] } }
// 失败: 非 2xx，{ message }
// ==========================================

use crate::api::credentials::CredentialProvider;
use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportSettings;
use crate::domain::import::{BatchOutcome, ImportBatch, ImportErrorEntry};
use crate::importer::importer_trait::ImportEndpoint;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("cricket-import/", env!("CARGO_PKG_VERSION"));

// ==========================================
// 响应结构
// ==========================================
#[derive(Debug, Deserialize)]
struct ImportEnvelope {
    data: ImportResponseData,
}

#[derive(Debug, Deserialize)]
struct ImportResponseData {
    #[serde(default)]
    imported: usize,
    #[serde(default)]
    failed: usize,
    #[serde(default)]
    skipped: usize,
    #[serde(default)]
    errors: Vec<Value>,
}

/// 单条行级错误: {rowNumber, error|message} 或字符串
///
/// 逐条宽松解析，单条格式异常不影响批次计数
fn row_error_from_value(value: Value) -> ImportErrorEntry {
    match value {
        Value::String(message) => ImportErrorEntry::general(message),
        Value::Object(ref fields) => {
            let row_number = fields.get("rowNumber").and_then(|v| match v {
                Value::Number(n) => n.as_u64().map(|n| n as usize),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            });
            let message = ["error", "message"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string());
            ImportErrorEntry {
                row_number,
                message,
            }
        }
        other => ImportErrorEntry::general(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    message: Option<String>,
}

/// 解析 2xx 响应体
pub fn parse_success_body(body: &str) -> ApiResult<BatchOutcome> {
    let envelope: ImportEnvelope = serde_json::from_str(body)?;
    let data = envelope.data;

    Ok(BatchOutcome {
        imported: data.imported,
        failed: data.failed,
        skipped: data.skipped,
        errors: data.errors.into_iter().map(row_error_from_value).collect(),
    })
}

/// 从非 2xx 响应中提取失败原因
///
/// 优先 JSON 的 message 字段，其次原始响应体，最后 HTTP 状态描述
pub fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(FailureBody { message: Some(msg) }) = serde_json::from_str::<FailureBody>(body) {
        if !msg.trim().is_empty() {
            return msg;
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 500 {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("未知错误")
        .to_string()
}

// ==========================================
// HttpImportEndpoint - reqwest 实现
// ==========================================
pub struct HttpImportEndpoint {
    http_client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpImportEndpoint {
    pub fn new(
        settings: &ImportSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url_for(&self, batch: &ImportBatch<'_>) -> String {
        format!("{}{}", self.base_url, batch.entity.import_path())
    }
}

#[async_trait]
impl ImportEndpoint for HttpImportEndpoint {
    async fn submit_batch(&self, batch: &ImportBatch<'_>) -> ApiResult<BatchOutcome> {
        let url = self.url_for(batch);
        debug!(url = %url, batch = batch.index, records = batch.len(), "提交导入批次");

        let mut request = self.http_client.post(&url).json(&batch.to_request_body());
        if let Some(token) = self.credentials.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message: failure_message(status, &body),
            });
        }

        parse_success_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_parse_success_body_mixed_errors() {
        let body = r#"{
            "data": {
                "imported": 7,
                "failed": 2,
                "skipped": 1,
                "errors": [
                    {"rowNumber": 4, "error": "Invalid email"},
                    "Trainee ID TRN9 already exists",
                    {"rowNumber": 9, "message": "Name too long"}
                ]
            }
        }"#;

        let outcome = parse_success_body(body).unwrap();

        assert_eq!(outcome.imported, 7);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(
            outcome.errors,
            vec![
                ImportErrorEntry::for_row(4, "Invalid email"),
                ImportErrorEntry::general("Trainee ID TRN9 already exists"),
                ImportErrorEntry::for_row(9, "Name too long"),
            ]
        );
    }

    #[test]
    fn test_parse_success_body_missing_fields_default_to_zero() {
        let outcome = parse_success_body(r#"{"data": {"imported": 3}}"#).unwrap();
        assert_eq!(outcome.imported, 3);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_parse_success_body_tolerates_malformed_row_errors() {
        let body = r#"{
            "data": {
                "imported": 8,
                "failed": 2,
                "errors": [
                    {"rowNumber": "7", "error": "Duplicate email"},
                    {"rowNumber": "abc", "error": "Missing name"},
                    {"rowNumber": 12},
                    42
                ]
            }
        }"#;

        let outcome = parse_success_body(body).unwrap();

        assert_eq!(outcome.imported, 8);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.errors.len(), 4);
        assert_eq!(outcome.errors[0], ImportErrorEntry::for_row(7, "Duplicate email"));
        assert_eq!(outcome.errors[1], ImportErrorEntry::general("Missing name"));
        assert_eq!(outcome.errors[2].row_number, Some(12));
        assert!(outcome.errors[2].message.contains("rowNumber"));
        assert_eq!(outcome.errors[3], ImportErrorEntry::general("42"));
    }

    #[test]
    fn test_parse_success_body_rejects_unexpected_shape() {
        let result = parse_success_body(r#"{"ok": true}"#);
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_failure_message_prefers_json_message() {
        let msg = failure_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "players must be an array"}"#,
        );
        assert_eq!(msg, "players must be an array");
    }

    #[test]
    fn test_failure_message_fallbacks() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            failure_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }
}
