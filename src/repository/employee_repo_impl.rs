// ==========================================
// 员工批量导入 - 员工 Repository 实现
// ==========================================
// 职责: 实现员工与批次数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::employee::{Employee, EmployeeBase, EmployeeKind, Manager, SalesRep, Technician};
use crate::domain::import_batch::{BatchStatus, BatchSummary, Diagnostic, ImportBatch};
use crate::repository::employee_repo::{EmployeeRepository, RejectionRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row, Transaction};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_EMPLOYEE_COLUMNS: &str = r#"
    SELECT employee_id, kind, last_name, first_name, hire_date, salary,
           grade, manager_id, annual_revenue, performance
    FROM employee
"#;

// ==========================================
// EmployeeRow - employee 表的一行（未重建经理引用）
// ==========================================
struct EmployeeRow {
    kind: String,
    base: EmployeeBase,
    grade: Option<u32>,
    manager_id: Option<String>,
    annual_revenue: Option<f64>,
    performance: Option<u32>,
}

impl EmployeeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            base: EmployeeBase {
                id: row.get(0)?,
                last_name: row.get(2)?,
                first_name: row.get(3)?,
                hire_date: row.get::<_, NaiveDate>(4)?,
                salary: row.get(5)?,
            },
            kind: row.get(1)?,
            grade: row.get(6)?,
            manager_id: row.get(7)?,
            annual_revenue: row.get(8)?,
            performance: row.get(9)?,
        })
    }
}

fn missing_field(field: &str, id: &str) -> RepositoryError {
    RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("员工 {} 缺少该字段", id),
    }
}

/// 由行数据重建员工；技术员的经理从 managers 中查找
fn assemble_employee(
    row: EmployeeRow,
    managers: &HashMap<String, Manager>,
) -> RepositoryResult<Employee> {
    let kind = EmployeeKind::from_db_str(&row.kind).ok_or_else(|| RepositoryError::FieldValueError {
        field: "kind".to_string(),
        message: format!("未知员工类别: {}", row.kind),
    })?;

    let employee = match kind {
        EmployeeKind::Manager => Employee::Manager(Manager { base: row.base }),
        EmployeeKind::Technician => {
            let grade = row.grade.ok_or_else(|| missing_field("grade", &row.base.id))?;
            let manager_id = row
                .manager_id
                .ok_or_else(|| missing_field("manager_id", &row.base.id))?;
            let manager = managers
                .get(&manager_id)
                .cloned()
                .ok_or(RepositoryError::NotFound {
                    entity: "Manager".to_string(),
                    id: manager_id,
                })?;
            Employee::Technician(Technician {
                base: row.base,
                grade,
                manager,
            })
        }
        EmployeeKind::SalesRep => {
            let annual_revenue = row
                .annual_revenue
                .ok_or_else(|| missing_field("annual_revenue", &row.base.id))?;
            let performance = row
                .performance
                .ok_or_else(|| missing_field("performance", &row.base.id))?;
            Employee::SalesRep(SalesRep {
                base: row.base,
                annual_revenue,
                performance,
            })
        }
    };

    Ok(employee)
}

fn batch_from_row(row: &Row<'_>) -> rusqlite::Result<ImportBatch> {
    let status_raw: String = row.get(2)?;
    let imported_at_raw: String = row.get(10)?;
    let imported_at = DateTime::parse_from_rfc3339(&imported_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default();

    Ok(ImportBatch {
        batch_id: row.get(0)?,
        source_label: row.get(1)?,
        status: BatchStatus::from_db_str(&status_raw).unwrap_or(BatchStatus::Completed),
        summary: BatchSummary {
            total_lines: row.get::<_, i64>(3)? as usize,
            accepted: row.get::<_, i64>(4)? as usize,
            rejected: row.get::<_, i64>(5)? as usize,
            skipped: row.get::<_, i64>(6)? as usize,
            managers: row.get::<_, i64>(7)? as usize,
            technicians: row.get::<_, i64>(8)? as usize,
            sales_reps: row.get::<_, i64>(9)? as usize,
        },
        imported_at,
        elapsed_ms: row.get(11)?,
    })
}

// ==========================================
// SqliteEmployeeRepository
// ==========================================
pub struct SqliteEmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEmployeeRepository {
    /// 打开数据库并确保 schema 存在
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（与 ConfigManager 共享同一连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = lock(&conn)?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 在事务中插入批次行
    fn insert_batch_tx(tx: &Transaction, batch: &ImportBatch) -> RepositoryResult<()> {
        let s = &batch.summary;
        tx.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, source_label, status,
                total_lines, accepted, rejected, skipped,
                managers, technicians, sales_reps,
                imported_at, elapsed_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                batch.batch_id,
                batch.source_label,
                batch.status.as_db_str(),
                s.total_lines as i64,
                s.accepted as i64,
                s.rejected as i64,
                s.skipped as i64,
                s.managers as i64,
                s.technicians as i64,
                s.sales_reps as i64,
                batch.imported_at.to_rfc3339(),
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }

    /// 在事务中批量写入员工（INSERT OR REPLACE 策略）
    fn insert_employees_tx(
        tx: &Transaction,
        batch_id: &str,
        records: &[Employee],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT OR REPLACE INTO employee (
                employee_id, kind, last_name, first_name, hire_date, salary,
                grade, manager_id, annual_revenue, performance, batch_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )?;

        let mut count = 0;
        for employee in records {
            let base = employee.base();
            let (grade, manager_id, annual_revenue, performance) = match employee {
                Employee::Manager(_) => (None, None, None, None),
                Employee::Technician(t) => (Some(t.grade), Some(t.manager_id()), None, None),
                Employee::SalesRep(s) => (None, None, Some(s.annual_revenue), Some(s.performance)),
            };

            stmt.execute(params![
                base.id,
                employee.kind().as_db_str(),
                base.last_name,
                base.first_name,
                base.hire_date,
                base.salary,
                grade,
                manager_id,
                annual_revenue,
                performance,
                batch_id,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// 在事务中批量写入拒绝行
    fn insert_rejections_tx(
        tx: &Transaction,
        batch_id: &str,
        diagnostics: &[Diagnostic],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO import_rejection (batch_id, line_number, error_code, reason, raw_line)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;

        for d in diagnostics {
            stmt.execute(params![
                batch_id,
                d.line_number as i64,
                d.code(),
                d.reason,
                d.raw_line,
            ])?;
        }

        Ok(diagnostics.len())
    }

    fn query_rows(
        conn: &Connection,
        where_clause: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Vec<EmployeeRow>> {
        let sql = format!("{} {} ORDER BY rowid", SELECT_EMPLOYEE_COLUMNS, where_clause);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(args, EmployeeRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn load_managers(conn: &Connection) -> RepositoryResult<HashMap<String, Manager>> {
        let rows = Self::query_rows(conn, "WHERE kind = ?1", &[&EmployeeKind::Manager.as_db_str()])?;
        Ok(rows
            .into_iter()
            .map(|row| (row.base.id.clone(), Manager { base: row.base }))
            .collect())
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> RepositoryResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn save_batch(
        &self,
        batch: &ImportBatch,
        records: &[Employee],
        diagnostics: &[Diagnostic],
    ) -> RepositoryResult<usize> {
        let conn = lock(&self.conn)?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Self::insert_batch_tx(&tx, batch)?;
        let count = Self::insert_employees_tx(&tx, &batch.batch_id, records)?;
        Self::insert_rejections_tx(&tx, &batch.batch_id, diagnostics)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    fn list_employees(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = lock(&self.conn)?;
        let managers = Self::load_managers(&conn)?;

        Self::query_rows(&conn, "", &[])?
            .into_iter()
            .map(|row| assemble_employee(row, &managers))
            .collect()
    }

    fn find_employee(&self, employee_id: &str) -> RepositoryResult<Option<Employee>> {
        let conn = lock(&self.conn)?;

        let Some(row) = Self::query_rows(&conn, "WHERE employee_id = ?1", &[&employee_id])?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        let managers = Self::load_managers(&conn)?;
        assemble_employee(row, &managers).map(Some)
    }

    fn count_employees(&self) -> RepositoryResult<usize> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn get_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = lock(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, source_label, status,
                   total_lines, accepted, rejected, skipped,
                   managers, technicians, sales_reps,
                   imported_at, elapsed_ms
            FROM import_batch
            ORDER BY imported_at DESC
            LIMIT ?1
            "#,
        )?;

        let batches = stmt
            .query_map(params![limit as i64], batch_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(batches)
    }

    fn get_rejections_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<RejectionRecord>> {
        let conn = lock(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, line_number, error_code, reason, raw_line
            FROM import_rejection
            WHERE batch_id = ?1
            ORDER BY line_number
            "#,
        )?;

        let rejections = stmt
            .query_map(params![batch_id], |row| {
                Ok(RejectionRecord {
                    batch_id: row.get(0)?,
                    line_number: row.get::<_, i64>(1)? as usize,
                    error_code: row.get(2)?,
                    reason: row.get(3)?,
                    raw_line: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::batch_engine::BatchEngine;

    fn setup_repo() -> SqliteEmployeeRepository {
        let conn = Connection::open_in_memory().unwrap();
        SqliteEmployeeRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn batch(batch_id: &str, summary: BatchSummary) -> ImportBatch {
        ImportBatch {
            batch_id: batch_id.to_string(),
            source_label: "inline".to_string(),
            status: BatchStatus::Completed,
            summary,
            imported_at: Utc::now(),
            elapsed_ms: 3,
        }
    }

    #[test]
    fn test_save_and_read_back_relinks_manager() {
        let repo = setup_repo();
        let outcome = BatchEngine::default().run_lines([
            "M00001,Dupont,Jean,01/01/2000,3000",
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
            "C00003,Durand,Anne,05/06/2015,2500,125000.5,80",
            "X00004,Foo,Bar,01/01/2000,100",
        ]);

        let saved = repo
            .save_batch(&batch("b-1", outcome.summary()), &outcome.records, &outcome.diagnostics)
            .unwrap();
        assert_eq!(saved, 3);
        assert_eq!(repo.count_employees().unwrap(), 3);

        let employees = repo.list_employees().unwrap();
        assert_eq!(employees, outcome.records);

        let rejections = repo.get_rejections_by_batch("b-1").unwrap();
        assert_eq!(rejections.len(), 1);
        assert_eq!(rejections[0].line_number, 4);
        assert_eq!(rejections[0].error_code, "UNKNOWN_RECORD_KIND");
    }

    #[test]
    fn test_find_employee() {
        let repo = setup_repo();
        let outcome = BatchEngine::default().run_lines([
            "M00001,Dupont,Jean,01/01/2000,3000",
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
        ]);
        repo.save_batch(&batch("b-1", outcome.summary()), &outcome.records, &[])
            .unwrap();

        let Some(Employee::Technician(t)) = repo.find_employee("T00002").unwrap() else {
            panic!("期望技术员记录");
        };
        assert_eq!(t.manager.base.first_name, "Jean");
        assert!(repo.find_employee("T09999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_manager_in_batch_reads_back_latest() {
        let repo = setup_repo();
        let outcome = BatchEngine::default().run_lines([
            "M00001,Dupont,Jean,01/01/2000,3000",
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
            "M00001,Bernard,Luc,01/01/2005,3200",
        ]);
        let Employee::Technician(in_batch) = &outcome.records[1] else {
            panic!("第 2 条应为技术员");
        };
        assert_eq!(in_batch.manager.base.last_name, "Dupont");

        repo.save_batch(&batch("b-1", outcome.summary()), &outcome.records, &[])
            .unwrap();

        let Some(Employee::Technician(t)) = repo.find_employee("T00002").unwrap() else {
            panic!("期望技术员记录");
        };
        assert_eq!(t.manager.base.last_name, "Bernard");
        assert_eq!(repo.count_employees().unwrap(), 2);
        assert_ne!(repo.list_employees().unwrap(), outcome.records);
    }

    #[test]
    fn test_reimport_replaces_by_id() {
        let repo = setup_repo();
        let engine = BatchEngine::default();

        let first = engine.run_lines(["M00001,Dupont,Jean,01/01/2000,3000"]);
        repo.save_batch(&batch("b-1", first.summary()), &first.records, &[])
            .unwrap();

        let second = engine.run_lines(["M00001,Dupont,Jean,01/01/2000,3500"]);
        repo.save_batch(&batch("b-2", second.summary()), &second.records, &[])
            .unwrap();

        assert_eq!(repo.count_employees().unwrap(), 1);
        let employee = repo.find_employee("M00001").unwrap().unwrap();
        assert_eq!(employee.base().salary, 3500.0);
        assert_eq!(repo.get_recent_batches(10).unwrap().len(), 2);
    }

    #[test]
    fn test_batch_row_round_trip() {
        let repo = setup_repo();
        let summary = BatchSummary {
            total_lines: 4,
            accepted: 3,
            rejected: 1,
            skipped: 0,
            managers: 1,
            technicians: 1,
            sales_reps: 1,
        };
        repo.save_batch(&batch("b-1", summary.clone()), &[], &[]).unwrap();

        let batches = repo.get_recent_batches(1).unwrap();
        assert_eq!(batches[0].batch_id, "b-1");
        assert_eq!(batches[0].summary, summary);
        assert_eq!(batches[0].status, BatchStatus::Completed);
    }
}
