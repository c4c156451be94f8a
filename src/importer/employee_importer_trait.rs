// ==========================================
// 员工批量导入 - 导入接口 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 行来源 → 行分类 → 记录解析 → 批次引擎 → 落库
// ==========================================

use crate::domain::employee::{Employee, EmployeeKind};
use crate::domain::import_batch::ImportReport;
use crate::importer::error::{ImportResult, LineResult};
use std::path::Path;

// ==========================================
// LineSource Trait
// ==========================================
// 用途: 行来源（阶段 0）
// 实现者: FileLineSource, MemoryLineSource
pub trait LineSource: Send + Sync {
    /// 读取完整的有序行序列
    ///
    /// # 返回
    /// - Ok(Vec<String>): 行列表（已去除行尾换行符）
    /// - Err: 来源无法打开或读取
    fn read_lines(&self) -> ImportResult<Vec<String>>;

    /// 来源描述（文件路径或内存标签），用于日志与批次记录
    fn label(&self) -> String;
}

// ==========================================
// RecordParser Trait
// ==========================================
// 用途: 单类员工的行解析（阶段 2）
// 实现者: ManagerParser, TechnicianParser, SalesRepParser
pub trait RecordParser: Send + Sync {
    /// 该解析器负责的员工类别
    fn kind(&self) -> EmployeeKind;

    /// 解析一行为员工记录
    ///
    /// # 参数
    /// - line: 原始行
    /// - accepted: 本批次中已接受的记录（按插入顺序），技术员用来查找经理
    ///
    /// # 返回
    /// - Ok(Employee): 全部字段通过校验
    /// - Err(LineError): 第一个违反的规则
    fn parse(&self, line: &str, accepted: &[Employee]) -> LineResult<Employee>;
}

// ==========================================
// EmployeeImporter Trait
// ==========================================
// 用途: 员工导入主接口
// 实现者: EmployeeImporterImpl
pub trait EmployeeImporter {
    /// 从任意行来源导入
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入结果（来源不可用时为空结果，status = SourceUnavailable）
    /// - Err: 落库错误
    fn import_from_source(&self, source: &dyn LineSource) -> ImportResult<ImportReport>;

    /// 从文本文件导入（.csv / .txt）
    fn import_from_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport>;
}
