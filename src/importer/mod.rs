// ==========================================
// 员工批量导入 - 导入层
// ==========================================
// 职责: 将逗号分隔的员工行解析为带类型的员工记录
// 支持: 经理(M) / 技术员(T) / 销售代表(C)
// 流程: 行来源 → 行分类 → 记录解析 → 批次引擎 → 落库
// ==========================================

// 模块声明
pub mod batch_engine;
pub mod employee_importer_impl;
pub mod employee_importer_trait;
pub mod error;
pub mod field_grammar;
pub mod file_parser;
pub mod line_classifier;
pub mod record_parser;
pub mod reject_report;

// 重导出核心类型
pub use batch_engine::BatchEngine;
pub use employee_importer_impl::EmployeeImporterImpl;
pub use error::{ImportError, ImportResult, LineError, LineResult};
pub use field_grammar::FieldGrammar;
pub use file_parser::{FileLineSource, MemoryLineSource};
pub use line_classifier::LineClassifier;
pub use record_parser::{ManagerParser, SalesRepParser, TechnicianParser};
pub use reject_report::{write_rejections, write_rejections_to_path};

// 重导出 Trait 接口
pub use employee_importer_trait::{EmployeeImporter, LineSource, RecordParser};
