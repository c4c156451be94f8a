// ==========================================
// 员工批量导入 - 批次与诊断模型
// ==========================================
// Diagnostic: 被拒绝行的诊断（行号 + 原始行 + 原因）
// BatchOutcome: 一次批次运行的两个独立有序序列
// ImportBatch: 批次元信息（对齐 import_batch 表）
// ==========================================

use crate::domain::employee::{Employee, EmployeeKind};
use crate::importer::error::LineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ==========================================
// Diagnostic - 单行诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line_number: usize, // 1 起始行号
    pub raw_line: String,   // 原始行文本
    pub reason: String,     // 可读原因（来自 error 的 Display）
    pub error: LineError,
}

impl Diagnostic {
    pub fn new(line_number: usize, raw_line: impl Into<String>, error: LineError) -> Self {
        Self {
            line_number,
            raw_line: raw_line.into(),
            reason: error.to_string(),
            error,
        }
    }

    pub fn code(&self) -> &'static str {
        self.error.code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "第 {} 行: {} => {}", self.line_number, self.reason, self.raw_line)
    }
}

// ==========================================
// BatchSummary - 批次汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_lines: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub managers: usize,
    pub technicians: usize,
    pub sales_reps: usize,
}

// ==========================================
// BatchOutcome - 批次引擎输出
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<Employee>,         // 已接受记录（文件顺序）
    pub diagnostics: Vec<Diagnostic>,   // 拒绝诊断（文件顺序）
    pub total_lines: usize,
    pub skipped_lines: usize,
    pub source_error: Option<String>, // 行来源不可用时的原因（此时结果为空）
}

impl BatchOutcome {
    /// 行来源不可用: 空结果 + 原因
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self {
            source_error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.diagnostics.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        let count = |kind: EmployeeKind| self.records.iter().filter(|e| e.kind() == kind).count();

        BatchSummary {
            total_lines: self.total_lines,
            accepted: self.records.len(),
            rejected: self.diagnostics.len(),
            skipped: self.skipped_lines,
            managers: count(EmployeeKind::Manager),
            technicians: count(EmployeeKind::Technician),
            sales_reps: count(EmployeeKind::SalesRep),
        }
    }
}

// ==========================================
// BatchStatus - 批次状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Completed,         // 已跑完全部行（允许部分拒绝）
    SourceUnavailable, // 无法获取行序列，结果为空
}

impl BatchStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            BatchStatus::Completed => "COMPLETED",
            BatchStatus::SourceUnavailable => "SOURCE_UNAVAILABLE",
        }
    }

    pub fn from_db_str(raw: &str) -> Option<Self> {
        match raw.trim() {
            "COMPLETED" => Some(BatchStatus::Completed),
            "SOURCE_UNAVAILABLE" => Some(BatchStatus::SourceUnavailable),
            _ => None,
        }
    }
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 对齐: import_batch 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,              // 批次 ID（UUID）
    pub source_label: String,          // 来源（文件路径或内存标签）
    pub status: BatchStatus,
    pub summary: BatchSummary,
    pub imported_at: DateTime<Utc>,    // 导入完成时间
    pub elapsed_ms: i64,               // 导入耗时（毫秒）
}

// ==========================================
// ImportReport - 一次导入的完整结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub batch: ImportBatch,
    pub records: Vec<Employee>,
    pub diagnostics: Vec<Diagnostic>,
    pub source_error: Option<String>, // 行来源不可用时的原因
    pub elapsed_time: Duration,
}

impl ImportReport {
    pub fn summary(&self) -> &BatchSummary {
        &self.batch.summary
    }

    pub fn is_source_unavailable(&self) -> bool {
        self.batch.status == BatchStatus::SourceUnavailable
    }
}
