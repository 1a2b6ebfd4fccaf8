// ==========================================
// 赛事管理系统 - 文件解析器实现
// ==========================================
// 职责: 上传文件 → 有序 RawRow 列表（带面向用户的行号）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)，扩展名不区分大小写
// 行号: 第 k 个（从 0 计）非空数据行 → row_number = k + 2
// ==========================================

use crate::domain::record::RawRow;
use crate::importer::error::{DecodeResult, ImportError};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// 表头占一行，且行号从 1 开始
const HEADER_ROW_OFFSET: usize = 2;

// ==========================================
// 文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// 根据文件名扩展名识别格式
    pub fn from_file_name(file_name: &str) -> DecodeResult<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, bytes: &[u8]) -> DecodeResult<Vec<RawRow>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ImportError::ParseError(format!("文件编码不是 UTF-8: {}", e)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        // 表头由第一条非空记录决定，因此不让 csv 自行消费表头
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;

            // 跳过空白行（仅含空白字符的整行）
            if record.len() <= 1 && record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            let Some(header_names) = headers.as_ref() else {
                headers = Some(record.iter().map(|h| h.trim().to_string()).collect());
                continue;
            };

            let cells = header_names
                .iter()
                .enumerate()
                .map(|(col_idx, header)| {
                    let value = record.get(col_idx).unwrap_or("").trim().to_string();
                    (header.clone(), value)
                })
                .collect();

            rows.push(RawRow::new(rows.len() + HEADER_ROW_OFFSET, cells));
        }

        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        debug!(rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_rows(&self, bytes: &[u8]) -> DecodeResult<Vec<RawRow>> {
        // xlsx / xls 由 calamine 自动识别
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ParseError("Excel 文件无工作表".to_string()));
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let Some(header_row) = sheet_rows.next() else {
            return Err(ImportError::EmptyFile);
        };

        let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in sheet_rows {
            // 跳过完全空白的行
            if data_row.iter().all(|cell| cell_to_string(cell).is_empty()) {
                continue;
            }

            let cells = headers
                .iter()
                .enumerate()
                .map(|(col_idx, header)| {
                    let value = data_row.get(col_idx).map(cell_to_string).unwrap_or_default();
                    (header.clone(), value)
                })
                .collect();

            rows.push(RawRow::new(rows.len() + HEADER_ROW_OFFSET, cells));
        }

        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        debug!(sheet = %sheet_name, rows = rows.len(), "Excel 解析完成");
        Ok(rows)
    }
}

/// 单元格转字符串；整数值的浮点单元格（如手机号）不带小数部分
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if *f == f.floor() && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UniversalFileParser {
    /// 文件大小上限（字节），None 表示不限制
    max_file_size_bytes: Option<u64>,
}

impl UniversalFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size_bytes = Some(limit);
        self
    }

    /// 解码内存中的文件内容
    ///
    /// # 参数
    /// - file_name: 原始文件名（用于识别格式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 按文件顺序排列的原始行
    /// - Err: UnsupportedFormat / EmptyFile / ParseError / FileTooLarge
    pub fn parse(&self, file_name: &str, bytes: &[u8]) -> DecodeResult<Vec<RawRow>> {
        let format = FileFormat::from_file_name(file_name)?;
        self.check_size(bytes.len() as u64)?;

        match format {
            FileFormat::Csv => CsvParser.parse_rows(bytes),
            FileFormat::Xlsx | FileFormat::Xls => ExcelParser.parse_rows(bytes),
        }
    }

    /// 从磁盘读取并解码
    pub async fn parse_path(&self, path: &Path) -> DecodeResult<Vec<RawRow>> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // 先校验格式与大小，避免读取无效文件
        FileFormat::from_file_name(&file_name)?;
        let metadata = tokio::fs::metadata(path).await?;
        self.check_size(metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        self.parse(&file_name, &bytes)
    }

    fn check_size(&self, size: u64) -> DecodeResult<()> {
        match self.max_file_size_bytes {
            Some(limit) if size > limit => Err(ImportError::FileTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}
