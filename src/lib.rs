// ==========================================
// 员工批量导入 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 定位: 逐行解析员工文件，单行失败不影响批次
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 员工与批次模型
pub mod domain;

// 导入层 - 行分类、字段校验、批次引擎
pub mod importer;

// 数据仓储层 - 记录接收端
pub mod repository;

// 配置层 - 导入配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    BatchOutcome, BatchStatus, BatchSummary, Diagnostic, Employee, EmployeeBase, EmployeeKind,
    ImportBatch, ImportReport, Manager, SalesRep, Technician,
};

// 导入
pub use importer::{
    BatchEngine, EmployeeImporter, EmployeeImporterImpl, FieldGrammar, FileLineSource,
    ImportError, ImportResult, LineClassifier, LineError, LineSource, MemoryLineSource,
};

// 配置
pub use config::{ConfigManager, ImportConfigReader, ImportSettings};

// 仓储
pub use repository::{EmployeeRepository, InMemoryEmployeeRepository, SqliteEmployeeRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "员工批量导入";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
