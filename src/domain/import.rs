// ==========================================
// 赛事管理系统 - 导入批次与导入结果
// ==========================================
// ImportBatch: 一次提交的记录切片（临时对象，发送后即丢弃）
// ImportResult: 跨批次累加的导入汇总
// ImportStage: 单次导入运行的状态机
// ==========================================

use crate::domain::record::CanonicalRecord;
use crate::domain::types::EntityKind;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

// ==========================================
// ImportBatch - 导入批次
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ImportBatch<'a> {
    pub entity: EntityKind,
    /// 批次序号（从 1 开始）
    pub index: usize,
    /// 本次运行的批次总数
    pub total: usize,
    pub records: &'a [CanonicalRecord],
    pub skip_duplicates: bool,
}

impl<'a> ImportBatch<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 批次覆盖的行号范围（首行, 末行）
    pub fn row_span(&self) -> Option<(usize, usize)> {
        let first = self.records.first()?.row_number();
        let last = self.records.last()?.row_number();
        Some((first, last))
    }

    /// 构造请求体: { <payload_key>: [...], skipDuplicates }
    pub fn to_request_body(&self) -> serde_json::Value {
        json!({
            self.entity.payload_key(): self.records,
            "skipDuplicates": self.skip_duplicates,
        })
    }
}

// ==========================================
// ImportErrorEntry - 错误明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportErrorEntry {
    /// 服务端未给出行号时为 None
    pub row_number: Option<usize>,
    pub message: String,
}

impl ImportErrorEntry {
    pub fn for_row(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            row_number: Some(row_number),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            row_number: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row_number {
            Some(row) => write!(f, "第 {} 行: {}", row, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

// ==========================================
// BatchOutcome - 单批次成功响应
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub imported: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<ImportErrorEntry>,
}

// ==========================================
// ImportResult - 导入汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// 映射后待提交的记录数
    pub total_records: usize,
    pub imported: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<ImportErrorEntry>,
    pub batches_submitted: usize,
    pub batches_failed: usize,
    /// 取消后未发送的记录数
    pub not_submitted: usize,
    pub cancelled: bool,
}

impl ImportResult {
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            ..Self::default()
        }
    }

    /// 累加成功批次的响应
    pub fn absorb(&mut self, outcome: BatchOutcome) {
        self.batches_submitted += 1;
        self.imported += outcome.imported;
        self.failed += outcome.failed;
        self.skipped += outcome.skipped;
        self.errors.extend(outcome.errors);
    }

    /// 整批失败: 批内全部记录计为失败，追加一条合成错误
    pub fn record_batch_failure(&mut self, batch: &ImportBatch<'_>, detail: &str) {
        self.batches_submitted += 1;
        self.batches_failed += 1;
        self.failed += batch.len();

        let message = match batch.row_span() {
            Some((first, last)) => format!(
                "批次 {}/{} 提交失败（第 {}-{} 行）: {}",
                batch.index, batch.total, first, last, detail
            ),
            None => format!("批次 {}/{} 提交失败: {}", batch.index, batch.total, detail),
        };
        self.errors.push(ImportErrorEntry::general(message));
    }

    /// 取消: 剩余记录不再发送
    pub fn mark_cancelled(&mut self, remaining: usize) {
        self.cancelled = true;
        self.not_submitted += remaining;
    }

    /// imported + failed + skipped + not_submitted
    pub fn accounted(&self) -> usize {
        self.imported + self.failed + self.skipped + self.not_submitted
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || !self.errors.is_empty()
    }

    /// 截取前 limit 条错误信息（用于界面展示）
    pub fn error_messages(&self, limit: usize) -> Vec<String> {
        self.errors.iter().take(limit).map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "导入 {} 条，失败 {} 条，跳过 {} 条",
            self.imported, self.failed, self.skipped
        )?;
        if self.cancelled {
            write!(f, "，已取消（{} 条未提交）", self.not_submitted)?;
        }
        Ok(())
    }
}

// ==========================================
// ImportStage - 导入运行状态
// ==========================================
// Idle → Decoding → Mapping → Submitting(i/n) → Completed
// Failed 仅可由 Decoding 进入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStage {
    Idle,
    Decoding,
    Mapping,
    Submitting { batch: usize, total: usize },
    Completed,
    Failed { reason: String },
}

impl ImportStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStage::Completed | ImportStage::Failed { .. })
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStage::Idle => write!(f, "IDLE"),
            ImportStage::Decoding => write!(f, "DECODING"),
            ImportStage::Mapping => write!(f, "MAPPING"),
            ImportStage::Submitting { batch, total } => {
                write!(f, "SUBMITTING({}/{})", batch, total)
            }
            ImportStage::Completed => write!(f, "COMPLETED"),
            ImportStage::Failed { reason } => write!(f, "FAILED({})", reason),
        }
    }
}
