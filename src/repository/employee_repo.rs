// ==========================================
// 员工批量导入 - 员工 Repository Trait
// ==========================================
// 职责: 定义员工与导入批次的数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::import_batch::{Diagnostic, ImportBatch};
use crate::repository::error::RepositoryResult;
use serde::{Deserialize, Serialize};

// ==========================================
// RejectionRecord - 已落库的拒绝行
// ==========================================
// 对齐: import_rejection 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub batch_id: String,
    pub line_number: usize,
    pub error_code: String,
    pub reason: String,
    pub raw_line: String,
}

impl RejectionRecord {
    pub fn from_diagnostic(batch_id: &str, diagnostic: &Diagnostic) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            line_number: diagnostic.line_number,
            error_code: diagnostic.code().to_string(),
            reason: diagnostic.reason.clone(),
            raw_line: diagnostic.raw_line.clone(),
        }
    }
}

// ==========================================
// EmployeeRepository Trait
// ==========================================
// 用途: 导入结果的记录接收端
// 实现者: SqliteEmployeeRepository（rusqlite）/ InMemoryEmployeeRepository
pub trait EmployeeRepository: Send + Sync {
    // ===== 批量写入（事务化）=====

    /// 写入一个批次: 批次行 + 已接受员工 + 拒绝行
    ///
    /// # 参数
    /// - batch: 批次元信息
    /// - records: 已接受员工（文件顺序，按编号 INSERT OR REPLACE）
    /// - diagnostics: 拒绝诊断
    ///
    /// # 返回
    /// - Ok(usize): 写入的员工数
    /// - Err: 数据库错误（整个事务回滚）
    fn save_batch(
        &self,
        batch: &ImportBatch,
        records: &[Employee],
        diagnostics: &[Diagnostic],
    ) -> RepositoryResult<usize>;

    // ===== 查询 =====

    /// 全部员工（技术员的经理引用已重建）
    ///
    /// 员工按编号存储，读回时技术员关联到当前存储的同编号经理。
    /// 同一批次内经理编号重复时，夹在两条经理之间的技术员在批次结果中
    /// 关联的是前一条，读回后关联的是最后一条，因此结果可能与
    /// `BatchOutcome::records` 不同；开启 enforce_unique_ids 可避免。
    fn list_employees(&self) -> RepositoryResult<Vec<Employee>>;

    /// 按编号查找员工
    fn find_employee(&self, employee_id: &str) -> RepositoryResult<Option<Employee>>;

    /// 员工总数
    fn count_employees(&self) -> RepositoryResult<usize>;

    /// 最近的批次（按导入时间倒序）
    fn get_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>>;

    /// 指定批次的拒绝行（按行号升序）
    fn get_rejections_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<RejectionRecord>>;
}
