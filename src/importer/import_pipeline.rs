// ==========================================
// 赛事管理系统 - 导入管道
// ==========================================
// 流程: 解码 → 列解析/规范化/映射 → 分批提交
// 状态: Idle → Decoding → Mapping → Submitting(i/n) → Completed
//       解码失败 → Failed（此时不发生任何网络请求）
// ==========================================

use crate::config::ImportSettings;
use crate::domain::import::{ImportResult, ImportStage};
use crate::domain::record::RawRow;
use crate::domain::types::EntityKind;
use crate::importer::batch_submitter::BatchSubmitter;
use crate::importer::entity_schema::schema_for;
use crate::importer::error::{DecodeResult, ImportError};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{ImportEndpoint, ImportObserver, MappingContext, NoopObserver};
use crate::importer::record_mapper::{MappedRecords, RecordMapper};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// ImportPipeline
// ==========================================
pub struct ImportPipeline<'a> {
    endpoint: &'a dyn ImportEndpoint,
    file_parser: UniversalFileParser,
    batch_size: usize,
    skip_duplicates: bool,
    cancel_token: Option<CancellationToken>,
    observer: &'a dyn ImportObserver,
}

impl<'a> ImportPipeline<'a> {
    /// 创建导入管道
    ///
    /// # 参数
    /// - endpoint: 批量导入接口
    /// - settings: 批次大小 / 去重 / 文件大小上限
    pub fn new(endpoint: &'a dyn ImportEndpoint, settings: &ImportSettings) -> Self {
        Self {
            endpoint,
            file_parser: UniversalFileParser::new().with_max_file_size(settings.max_file_size_bytes),
            batch_size: settings.batch_size,
            skip_duplicates: settings.skip_duplicates,
            cancel_token: None,
            observer: &NoopObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn ImportObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// 从磁盘文件导入
    #[instrument(skip(self, path), fields(run_id, entity = %entity))]
    pub async fn run_file(&self, entity: EntityKind, path: &Path) -> Result<ImportResult, ImportError> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(run_id = %run_id, file_path = %path.display(), "开始导入");

        self.begin_decode();
        let rows = self.finish_decode(self.file_parser.parse_path(path).await)?;
        Ok(self.map_and_submit(entity, &rows).await)
    }

    /// 从内存中的文件内容导入（上传场景）
    #[instrument(skip(self, bytes), fields(run_id, entity = %entity, size = bytes.len()))]
    pub async fn run_bytes(
        &self,
        entity: EntityKind,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ImportResult, ImportError> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(run_id = %run_id, file_name = %file_name, "开始导入");

        self.begin_decode();
        let rows = self.finish_decode(self.file_parser.parse(file_name, bytes))?;
        Ok(self.map_and_submit(entity, &rows).await)
    }

    /// 只解码与映射，不提交（预览 / dry-run）
    pub async fn map_file(&self, entity: EntityKind, path: &Path) -> Result<MappedRecords, ImportError> {
        self.begin_decode();
        let rows = self.finish_decode(self.file_parser.parse_path(path).await)?;
        Ok(self.map(entity, &rows))
    }

    /// 解析开始前通知: Idle → Decoding
    fn begin_decode(&self) {
        self.observer.on_stage(&ImportStage::Idle);
        self.observer.on_stage(&ImportStage::Decoding);
    }

    fn finish_decode(&self, parsed: DecodeResult<Vec<RawRow>>) -> DecodeResult<Vec<RawRow>> {
        match parsed {
            Ok(rows) => {
                info!(total_rows = rows.len(), "文件解析完成");
                Ok(rows)
            }
            Err(e) => {
                error!(error = %e, "文件解析失败");
                self.observer.on_stage(&ImportStage::Failed {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn map(&self, entity: EntityKind, rows: &[RawRow]) -> MappedRecords {
        self.observer.on_stage(&ImportStage::Mapping);

        let schema = schema_for(entity);
        let mapper = RecordMapper::new(schema.as_ref(), MappingContext::new(Utc::now()));
        let mapped = mapper.map_rows(rows);

        info!(
            records = mapped.records.len(),
            dropped = mapped.dropped_rows.len(),
            "字段映射完成"
        );
        mapped
    }

    async fn map_and_submit(&self, entity: EntityKind, rows: &[RawRow]) -> ImportResult {
        let start_time = Instant::now();
        let mapped = self.map(entity, rows);

        let mut submitter =
            BatchSubmitter::new(self.endpoint, self.batch_size).skip_duplicates(self.skip_duplicates);
        if let Some(token) = &self.cancel_token {
            submitter = submitter.with_cancellation(token.clone());
        }

        let result = submitter.submit(entity, &mapped.records, self.observer).await;
        self.observer.on_stage(&ImportStage::Completed);

        info!(
            imported = result.imported,
            failed = result.failed,
            skipped = result.skipped,
            batches_failed = result.batches_failed,
            cancelled = result.cancelled,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入完成"
        );
        debug!(errors = result.errors.len(), "错误明细条数");

        result
    }
}
