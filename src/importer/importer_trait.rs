// ==========================================
// 赛事管理系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 说明: 提交端点 / 观察者由导入层定义，API 层与调用方实现
// ==========================================

use crate::api::error::ApiError;
use crate::domain::import::{BatchOutcome, ImportBatch, ImportStage};
use crate::domain::record::{CanonicalRecord, RawRow};
use crate::domain::types::EntityKind;
use crate::importer::column_resolver::FieldSpec;
use crate::importer::error::DecodeResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解码（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 非空数据行，row_number 从 2 开始
    /// - Err: EmptyFile / ParseError
    fn parse_rows(&self, bytes: &[u8]) -> DecodeResult<Vec<RawRow>>;
}

// ==========================================
// MappingContext - 单次导入运行的映射上下文
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct MappingContext {
    /// 导入开始时间（用于生成兜底学员编号）
    pub started_at: DateTime<Utc>,
}

impl MappingContext {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }
}

// ==========================================
// EntitySchema Trait
// ==========================================
// 用途: 每种导入实体的字段表 + 规范化策略（阶段 1）
// 实现者: PlayerSchema, FoodRegistrationSchema, CommitteeMemberSchema
pub trait EntitySchema: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// 目标字段及候选列名
    fn field_specs(&self) -> &'static [FieldSpec];

    /// 将原始行映射为规范记录
    ///
    /// # 返回
    /// - Some(record): 至少一个标识字段非空
    /// - None: 姓名/邮箱/学员编号解析后均为空（静默丢弃）
    fn map_row(&self, row: &RawRow, ctx: &MappingContext) -> Option<CanonicalRecord>;
}

// ==========================================
// ImportEndpoint Trait
// ==========================================
// 用途: 批量导入接口（阶段 2）
// 实现者: HttpImportEndpoint（reqwest）, 测试中的 Mock
#[async_trait]
pub trait ImportEndpoint: Send + Sync {
    /// 提交单个批次
    ///
    /// # 返回
    /// - Ok(BatchOutcome): 2xx 响应中的计数与行级错误
    /// - Err(ApiError): 非 2xx 或网络错误（整批计为失败）
    async fn submit_batch(&self, batch: &ImportBatch<'_>) -> Result<BatchOutcome, ApiError>;
}

// ==========================================
// ImportObserver Trait
// ==========================================
// 用途: 导入状态与进度通知（仅供界面展示，不影响控制流）
pub trait ImportObserver: Send + Sync {
    fn on_stage(&self, _stage: &ImportStage) {}

    /// 批次完成后的进度百分比 [0, 100]
    fn on_progress(&self, _percent: u8) {}
}

/// 不做任何事的观察者
pub struct NoopObserver;

impl ImportObserver for NoopObserver {}

/// 仅关心进度的闭包观察者
pub struct ProgressCallback<F>(pub F);

impl<F> ImportObserver for ProgressCallback<F>
where
    F: Fn(u8) + Send + Sync,
{
    fn on_progress(&self, percent: u8) {
        (self.0)(percent)
    }
}
