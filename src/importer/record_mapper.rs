// ==========================================
// 赛事管理系统 - 记录映射器
// ==========================================
// 职责: RawRow 序列 → CanonicalRecord 序列
// 规则: 纯函数、保序；标识字段全空的行静默丢弃（导出表格常见的空白尾行）
// ==========================================

use crate::domain::record::{CanonicalRecord, RawRow};
use crate::importer::importer_trait::{EntitySchema, MappingContext};
use tracing::debug;

/// 映射结果
#[derive(Debug, Clone, Default)]
pub struct MappedRecords {
    pub records: Vec<CanonicalRecord>,
    /// 被丢弃的行号（按输入顺序）
    pub dropped_rows: Vec<usize>,
}

pub struct RecordMapper<'a> {
    schema: &'a dyn EntitySchema,
    ctx: MappingContext,
}

impl<'a> RecordMapper<'a> {
    pub fn new(schema: &'a dyn EntitySchema, ctx: MappingContext) -> Self {
        Self { schema, ctx }
    }

    pub fn map_rows(&self, rows: &[RawRow]) -> MappedRecords {
        let mut mapped = MappedRecords {
            records: Vec::with_capacity(rows.len()),
            dropped_rows: Vec::new(),
        };

        for row in rows {
            match self.schema.map_row(row, &self.ctx) {
                Some(record) => mapped.records.push(record),
                None => {
                    debug!(row_number = row.row_number(), "标识字段为空，跳过该行");
                    mapped.dropped_rows.push(row.row_number());
                }
            }
        }

        mapped
    }
}
