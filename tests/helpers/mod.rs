// ==========================================
// 集成测试辅助
// ==========================================
// - RecordingEndpoint: 记录每个批次的请求体，可按批次号注入失败
// - StubServer: 本地 axum 桩服务，记录请求并按顺序返回预设响应
// - write_fixture: 在临时目录写入测试文件
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use cricket_import::api::ApiError;
use cricket_import::domain::{BatchOutcome, ImportBatch, ImportErrorEntry};
use cricket_import::importer::ImportEndpoint;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;

// ==========================================
// RecordingEndpoint
// ==========================================

/// 已提交批次的快照
#[derive(Debug, Clone)]
pub struct SubmittedBatch {
    pub index: usize,
    pub total: usize,
    pub body: Value,
    pub row_numbers: Vec<usize>,
}

#[derive(Default)]
pub struct RecordingEndpoint {
    submitted: Mutex<Vec<SubmittedBatch>>,
    failures: HashMap<usize, ApiError>,
    row_errors: HashMap<usize, Vec<ImportErrorEntry>>,
}

impl RecordingEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// 第 batch_index 批（从 1 计）返回错误
    pub fn fail_batch(mut self, batch_index: usize, error: ApiError) -> Self {
        self.failures.insert(batch_index, error);
        self
    }

    /// 第 batch_index 批中附带行级错误（对应记录计为 failed）
    pub fn with_row_errors(mut self, batch_index: usize, errors: Vec<ImportErrorEntry>) -> Self {
        self.row_errors.insert(batch_index, errors);
        self
    }

    pub fn submitted(&self) -> Vec<SubmittedBatch> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.submitted().iter().map(|b| b.row_numbers.len()).collect()
    }
}

#[async_trait]
impl ImportEndpoint for RecordingEndpoint {
    async fn submit_batch(&self, batch: &ImportBatch<'_>) -> Result<BatchOutcome, ApiError> {
        self.submitted.lock().unwrap().push(SubmittedBatch {
            index: batch.index,
            total: batch.total,
            body: batch.to_request_body(),
            row_numbers: batch.records.iter().map(|r| r.row_number()).collect(),
        });

        if let Some(err) = self.failures.get(&batch.index) {
            return Err(err.clone());
        }

        let errors = self.row_errors.get(&batch.index).cloned().unwrap_or_default();
        let failed = errors.len().min(batch.len());
        Ok(BatchOutcome {
            imported: batch.len() - failed,
            failed,
            skipped: 0,
            errors,
        })
    }
}

// ==========================================
// StubServer - axum 桩服务
// ==========================================

/// 桩服务收到的请求
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
struct StubState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<(u16, String)>>>,
}

pub struct StubServer {
    pub base_url: String,
    state: StubState,
}

impl StubServer {
    /// 启动桩服务；每个请求依次消费一条 (status, body) 响应
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let state = StubState {
            captured: Arc::default(),
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
        };
        let app = Router::new().fallback(capture).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.captured.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body,
    });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((500, r#"{"message":"no scripted response"}"#.to_string()));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

// ==========================================
// 测试文件
// ==========================================

/// 在临时目录写入文件，返回 (目录守卫, 文件路径)
pub fn write_fixture(file_name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// 生成 n 行球员 CSV（Name, Email）
pub fn player_csv(n: usize) -> String {
    let mut csv = String::from("Name,Email\n");
    for i in 1..=n {
        csv.push_str(&format!("Player {},player{}@club.org\n", i, i));
    }
    csv
}
