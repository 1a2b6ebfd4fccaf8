// ==========================================
// 赛事管理系统 - 导入层
// ==========================================
// 职责: 表格文件 → 规范记录 → 分批提交到后端
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod batch_submitter;
pub mod column_resolver;
pub mod entity_schema;
pub mod error;
pub mod field_normalizer;
pub mod file_parser;
pub mod import_pipeline;
pub mod importer_trait;
pub mod record_mapper;

// 重导出核心类型
pub use batch_submitter::{BatchSubmitter, DEFAULT_BATCH_SIZE};
pub use column_resolver::{resolve, FieldSpec};
pub use entity_schema::{schema_for, CommitteeMemberSchema, FoodRegistrationSchema, PlayerSchema};
pub use error::{DecodeResult, ImportError};
pub use file_parser::{CsvParser, ExcelParser, FileFormat, UniversalFileParser};
pub use import_pipeline::ImportPipeline;
pub use record_mapper::{MappedRecords, RecordMapper};

// 重导出 Trait 接口
pub use importer_trait::{
    EntitySchema, FileParser, ImportEndpoint, ImportObserver, MappingContext, NoopObserver,
    ProgressCallback,
};
