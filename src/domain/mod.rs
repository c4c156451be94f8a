// ==========================================
// 员工批量导入 - 领域模型层
// ==========================================
// 职责: 定义员工实体、批次与诊断模型
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod employee;
pub mod import_batch;

// 重导出核心类型
pub use employee::{Employee, EmployeeBase, EmployeeKind, Manager, SalesRep, Technician};
pub use import_batch::{
    BatchOutcome, BatchStatus, BatchSummary, Diagnostic, ImportBatch, ImportReport,
};
