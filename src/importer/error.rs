// ==========================================
// 员工批量导入 - 导入模块错误类型
// ==========================================
// LineError: 单行可恢复错误（只进入诊断列表，不中断批次）
// ImportError: 批次级错误（文件/配置/落库）
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::employee::EmployeeKind;
use crate::repository::error::RepositoryError;
use serde::Serialize;
use thiserror::Error;

/// 单行校验错误
///
/// 每个变体都携带原始值，`Display` 文本即诊断中的原因说明。
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineError {
    #[error("未知的员工类型: '{line}'")]
    UnknownRecordKind { line: String },

    #[error("{kind}行应包含 {expected} 个字段，实际 {actual} 个")]
    WrongFieldCount {
        kind: EmployeeKind,
        expected: usize,
        actual: usize,
    },

    #[error("员工编号 '{value}' 格式错误: 期望 {expected_prefix} 开头加 5 位数字")]
    InvalidIdentifierFormat { value: String, expected_prefix: char },

    #[error("{field} '{value}' 不是合法的姓名（仅允许字母、连字符和空格）")]
    InvalidName { field: String, value: String },

    #[error("日期 '{value}' 格式错误: 期望 dd/MM/yyyy")]
    InvalidDateFormat { value: String },

    #[error("工资 '{value}' 不是合法的非负金额")]
    InvalidSalary { value: String },

    #[error("年营业额 '{value}' 不是合法的非负金额")]
    InvalidRevenue { value: String },

    #[error("业绩指数 '{value}' 不是合法的非负整数")]
    InvalidPerformanceIndex { value: String },

    #[error("技术员等级 '{value}' 不是合法的整数")]
    InvalidGradeFormat { value: String },

    #[error("技术员等级 {value} 超出范围 [{min}, {max}]")]
    GradeOutOfRange { value: u32, min: u32, max: u32 },

    #[error("经理 {reference} 不存在（须在技术员之前出现）")]
    ManagerNotFound { reference: String },

    #[error("员工编号 {id} 重复（首次出现于第 {first_line} 行）")]
    DuplicateIdentifier { id: String, first_line: usize },
}

impl LineError {
    /// 稳定的错误代码（用于报告与落库）
    pub fn code(&self) -> &'static str {
        match self {
            LineError::UnknownRecordKind { .. } => "UNKNOWN_RECORD_KIND",
            LineError::WrongFieldCount { .. } => "WRONG_FIELD_COUNT",
            LineError::InvalidIdentifierFormat { .. } => "INVALID_IDENTIFIER_FORMAT",
            LineError::InvalidName { .. } => "INVALID_NAME",
            LineError::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            LineError::InvalidSalary { .. } => "INVALID_SALARY",
            LineError::InvalidRevenue { .. } => "INVALID_REVENUE",
            LineError::InvalidPerformanceIndex { .. } => "INVALID_PERFORMANCE_INDEX",
            LineError::InvalidGradeFormat { .. } => "INVALID_GRADE_FORMAT",
            LineError::GradeOutOfRange { .. } => "GRADE_OUT_OF_RANGE",
            LineError::ManagerNotFound { .. } => "MANAGER_NOT_FOUND",
            LineError::DuplicateIdentifier { .. } => "DUPLICATE_IDENTIFIER",
        }
    }
}

/// 单行结果别名
pub type LineResult<T> = Result<T, LineError>;

/// 导入模块错误类型（批次级）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.txt）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 报告导出错误 =====
    #[error("拒绝行报告写入失败: {0}")]
    ReportWriteError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 落库错误 =====
    #[error("数据落库失败: {0}")]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::ReportWriteError(err.to_string())
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Repository(RepositoryError::from(err))
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
