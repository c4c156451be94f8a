// ==========================================
// 员工批量导入 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 幂等建表（CREATE TABLE IF NOT EXISTS）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id    TEXT NOT NULL,
    key         TEXT NOT NULL,
    value       TEXT NOT NULL,
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS import_batch (
    batch_id      TEXT PRIMARY KEY,
    source_label  TEXT NOT NULL,
    status        TEXT NOT NULL,
    total_lines   INTEGER NOT NULL,
    accepted      INTEGER NOT NULL,
    rejected      INTEGER NOT NULL,
    skipped       INTEGER NOT NULL,
    managers      INTEGER NOT NULL,
    technicians   INTEGER NOT NULL,
    sales_reps    INTEGER NOT NULL,
    imported_at   TEXT NOT NULL,
    elapsed_ms    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS employee (
    employee_id     TEXT PRIMARY KEY,
    kind            TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    first_name      TEXT NOT NULL,
    hire_date       TEXT NOT NULL,
    salary          REAL NOT NULL,
    grade           INTEGER,
    manager_id      TEXT,
    annual_revenue  REAL,
    performance     INTEGER,
    batch_id        TEXT NOT NULL REFERENCES import_batch(batch_id)
);

CREATE INDEX IF NOT EXISTS idx_employee_batch ON employee(batch_id);

CREATE TABLE IF NOT EXISTS import_rejection (
    rejection_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    batch_id      TEXT NOT NULL REFERENCES import_batch(batch_id),
    line_number   INTEGER NOT NULL,
    error_code    TEXT NOT NULL,
    reason        TEXT NOT NULL,
    raw_line      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_rejection_batch ON import_rejection(batch_id);
"#;

/// 数据库路径环境变量（便于调试/测试/CI）
pub const DB_PATH_ENV: &str = "EMPLOYEE_IMPORT_DB_PATH";

/// 默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("employee-import").join("employees.db"),
        None => PathBuf::from("./employees.db"),
    }
}

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表并登记 schema_version（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    match read_schema_version(conn)? {
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        Some(v) => {
            warn!(found = v, expected = CURRENT_SCHEMA_VERSION, "数据库 schema_version 与代码不一致");
        }
        None => {
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [CURRENT_SCHEMA_VERSION],
            )?;
            debug!(version = CURRENT_SCHEMA_VERSION, "已初始化数据库 schema");
        }
    }

    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
