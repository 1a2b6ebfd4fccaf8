// ==========================================
// 赛事管理系统 - 批次提交器
// ==========================================
// 职责: 规范记录 → 固定大小批次 → 顺序提交 → 累加 ImportResult
// 红线:
// - 批次严格顺序提交，不存在并发在途批次（后端按身份键去重依赖此顺序）
// - 单批失败不重试、不中止，整批计为失败后继续下一批
// - 进度通知仅用于展示，不影响控制流
// ==========================================

use crate::domain::import::{ImportBatch, ImportResult, ImportStage};
use crate::domain::record::CanonicalRecord;
use crate::domain::types::EntityKind;
use crate::importer::importer_trait::{ImportEndpoint, ImportObserver};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// 默认批次大小
pub const DEFAULT_BATCH_SIZE: usize = 10;

pub struct BatchSubmitter<'a> {
    endpoint: &'a dyn ImportEndpoint,
    batch_size: usize,
    skip_duplicates: bool,
    cancel_token: Option<CancellationToken>,
}

impl<'a> BatchSubmitter<'a> {
    /// 创建批次提交器（batch_size 为 0 时按 1 处理）
    pub fn new(endpoint: &'a dyn ImportEndpoint, batch_size: usize) -> Self {
        Self {
            endpoint,
            batch_size: batch_size.max(1),
            skip_duplicates: true,
            cancel_token: None,
        }
    }

    pub fn skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }

    /// 批次之间检查取消信号；在途批次不会被打断
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 批次数 = ceil(记录数 / 批次大小)
    pub fn batch_count(&self, record_count: usize) -> usize {
        record_count.div_ceil(self.batch_size)
    }

    /// 顺序提交全部记录
    ///
    /// # 参数
    /// - entity: 导入实体种类
    /// - records: 映射后的规范记录（保持输入顺序）
    /// - observer: 状态/进度通知
    ///
    /// # 返回
    /// - ImportResult: 始终返回完整汇总（含失败批次）
    pub async fn submit(
        &self,
        entity: EntityKind,
        records: &[CanonicalRecord],
        observer: &dyn ImportObserver,
    ) -> ImportResult {
        let total = self.batch_count(records.len());
        let mut result = ImportResult::new(records.len());

        info!(
            entity = %entity,
            records = records.len(),
            batches = total,
            batch_size = self.batch_size,
            "开始分批提交"
        );

        for (idx, chunk) in records.chunks(self.batch_size).enumerate() {
            if self.is_cancelled() {
                let remaining = records.len() - idx * self.batch_size;
                warn!(
                    batch = idx + 1,
                    total = total,
                    remaining = remaining,
                    "导入已取消，剩余批次不再提交"
                );
                result.mark_cancelled(remaining);
                break;
            }

            let batch = ImportBatch {
                entity,
                index: idx + 1,
                total,
                records: chunk,
                skip_duplicates: self.skip_duplicates,
            };
            observer.on_stage(&ImportStage::Submitting {
                batch: batch.index,
                total,
            });

            match self.endpoint.submit_batch(&batch).await {
                Ok(outcome) => {
                    debug!(
                        batch = batch.index,
                        total = total,
                        imported = outcome.imported,
                        failed = outcome.failed,
                        skipped = outcome.skipped,
                        "批次提交成功"
                    );
                    result.absorb(outcome);
                }
                Err(e) => {
                    warn!(
                        batch = batch.index,
                        total = total,
                        records = batch.len(),
                        error = %e,
                        "批次提交失败，继续下一批"
                    );
                    result.record_batch_failure(&batch, &e.to_string());
                }
            }

            if batch.index < total {
                observer.on_progress(progress_percent(batch.index, total));
            }
        }

        observer.on_progress(100);

        info!(
            entity = %entity,
            imported = result.imported,
            failed = result.failed,
            skipped = result.skipped,
            batches_failed = result.batches_failed,
            cancelled = result.cancelled,
            "分批提交完成"
        );

        result
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_token
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false)
    }
}

/// 已完成批次占比（向下取整）
fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done * 100) / total).min(100) as u8
}
