// ==========================================
// 赛事管理系统 - 列名解析器
// ==========================================
// 职责: 将命名不规范的源列映射到固定目标字段
// 优先级（不可调整）:
//   1. 按关键字顺序逐个尝试精确匹配（区分大小写）
//   2. 再按关键字顺序，对每个关键字按列顺序做小写子串匹配
//   3. 均未命中 → 空字符串
// 调用方须把最具体的关键字放在前面（如 "Email Address" 先于 "Email"）
// ==========================================

use crate::domain::record::RawRow;

// ==========================================
// FieldSpec - 目标字段 + 候选关键字
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 目标字段名（与后端字段一致）
    pub target: &'static str,
    /// 候选列名关键字（按优先级排列）
    pub keywords: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(target: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { target, keywords }
    }

    /// 在行中定位本字段的值
    pub fn resolve(&self, row: &RawRow) -> String {
        resolve(row, self.keywords)
    }
}

/// 按关键字列表解析字段值（已 TRIM），未命中返回空字符串
pub fn resolve(row: &RawRow, keywords: &[&str]) -> String {
    if let Some(value) = resolve_exact(row, keywords) {
        return value.trim().to_string();
    }

    resolve_fuzzy(row, keywords)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// 精确匹配: 第一个在行中存在的关键字
fn resolve_exact<'a>(row: &'a RawRow, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|keyword| row.get(keyword))
}

/// 子串匹配: 列名小写后包含关键字小写
fn resolve_fuzzy<'a>(row: &'a RawRow, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|keyword| {
        let needle = keyword.to_lowercase();
        row.iter()
            .find(|(header, _)| header.to_lowercase().contains(&needle))
            .map(|(_, value)| value)
    })
}
