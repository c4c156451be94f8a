// ==========================================
// 员工批量导入 - 内存 Repository
// ==========================================
// 用途: dry-run 与测试，语义与 SQLite 实现一致（按编号覆盖，读回时重建经理关联）
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::import_batch::{Diagnostic, ImportBatch};
use crate::repository::employee_repo::{EmployeeRepository, RejectionRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryStore {
    employees: Vec<Employee>,
    batches: Vec<ImportBatch>,
    rejections: Vec<RejectionRecord>,
}

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    store: Mutex<MemoryStore>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, MemoryStore>> {
        self.store
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl MemoryStore {
    /// 技术员关联到当前存储的同编号经理（与 SQLite 读回一致）
    fn relinked(&self, employee: &Employee) -> Employee {
        let Employee::Technician(t) = employee else {
            return employee.clone();
        };

        let current = self
            .employees
            .iter()
            .filter_map(Employee::as_manager)
            .find(|m| m.base.id == t.manager_id())
            .cloned();

        let mut t = t.clone();
        if let Some(manager) = current {
            t.manager = manager;
        }
        Employee::Technician(t)
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn save_batch(
        &self,
        batch: &ImportBatch,
        records: &[Employee],
        diagnostics: &[Diagnostic],
    ) -> RepositoryResult<usize> {
        let mut store = self.lock()?;

        if store.batches.iter().any(|b| b.batch_id == batch.batch_id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "import_batch.batch_id={}",
                batch.batch_id
            )));
        }
        store.batches.push(batch.clone());

        // 与 INSERT OR REPLACE 一致: 旧记录删除，新记录追加到末尾
        for employee in records {
            store.employees.retain(|e| e.id() != employee.id());
            store.employees.push(employee.clone());
        }

        store.rejections.extend(
            diagnostics
                .iter()
                .map(|d| RejectionRecord::from_diagnostic(&batch.batch_id, d)),
        );

        Ok(records.len())
    }

    fn list_employees(&self) -> RepositoryResult<Vec<Employee>> {
        let store = self.lock()?;
        Ok(store.employees.iter().map(|e| store.relinked(e)).collect())
    }

    fn find_employee(&self, employee_id: &str) -> RepositoryResult<Option<Employee>> {
        let store = self.lock()?;
        Ok(store
            .employees
            .iter()
            .find(|e| e.id() == employee_id)
            .map(|e| store.relinked(e)))
    }

    fn count_employees(&self) -> RepositoryResult<usize> {
        Ok(self.lock()?.employees.len())
    }

    fn get_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let mut batches = self.lock()?.batches.clone();
        batches.sort_by(|a, b| b.imported_at.cmp(&a.imported_at));
        batches.truncate(limit);
        Ok(batches)
    }

    fn get_rejections_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<RejectionRecord>> {
        let mut rejections: Vec<RejectionRecord> = self
            .lock()?
            .rejections
            .iter()
            .filter(|r| r.batch_id == batch_id)
            .cloned()
            .collect();
        rejections.sort_by_key(|r| r.line_number);
        Ok(rejections)
    }
}
