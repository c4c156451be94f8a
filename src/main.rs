// ==========================================
// 员工批量导入 - 命令行入口
// ==========================================
// 用法:
//   employee-import <FILE> [--db PATH] [--dry-run] [--rejects PATH] [--json] [--strict-ids]
// 退出码: 行来源不可用或落库失败时非 0
// ==========================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use employee_import::config::{ConfigManager, ImportConfigReader, ImportSettings};
use employee_import::db::{default_db_path, open_sqlite_connection};
use employee_import::importer::{write_rejections_to_path, EmployeeImporter, EmployeeImporterImpl};
use employee_import::repository::{
    EmployeeRepository, InMemoryEmployeeRepository, SqliteEmployeeRepository,
};
use employee_import::{logging, ImportReport, APP_NAME, VERSION};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

/// 导入经理/技术员/销售代表员工文件（逗号分隔，无表头）
#[derive(Parser)]
#[command(name = "employee-import", version)]
struct Cli {
    /// 员工文件（.csv / .txt）
    file: PathBuf,

    /// SQLite 数据库路径（默认位于用户数据目录）
    #[arg(long)]
    db: Option<PathBuf>,

    /// 只解析校验，不写数据库
    #[arg(long)]
    dry_run: bool,

    /// 将拒绝行写出为 CSV 报告
    #[arg(long, value_name = "PATH")]
    rejects: Option<PathBuf>,

    /// 以 JSON 输出导入结果
    #[arg(long)]
    json: bool,

    /// 同批次内员工编号重复时拒绝后出现的行
    #[arg(long)]
    strict_ids: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();
    info!(version = VERSION, "{} 启动", APP_NAME);

    let report = if cli.dry_run {
        let settings = ImportSettings {
            enforce_unique_ids: cli.strict_ids,
            ..ImportSettings::default()
        };
        run_import(InMemoryEmployeeRepository::new(), settings, &cli.file)?
    } else {
        let db_path = cli.db.clone().unwrap_or_else(default_db_path);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建数据库目录 {}", parent.display()))?;
        }
        info!(db_path = %db_path.display(), "使用数据库");

        let conn = open_sqlite_connection(&db_path.to_string_lossy())
            .with_context(|| format!("无法打开数据库 {}", db_path.display()))?;
        let conn = Arc::new(Mutex::new(conn));

        // 先建表，再读配置
        let repo = SqliteEmployeeRepository::from_connection(conn.clone())
            .context("数据库初始化失败")?;
        let mut settings = ConfigManager::from_connection(conn)?
            .load_settings()
            .context("导入配置读取失败")?;
        settings.enforce_unique_ids |= cli.strict_ids;

        run_import(repo, settings, &cli.file)?
    };

    if let Some(path) = &cli.rejects {
        write_rejections_to_path(path, &report.diagnostics)
            .with_context(|| format!("无法写出拒绝行报告 {}", path.display()))?;
    }

    if cli.json {
        print_json(&report)?;
    } else {
        print_text(&report);
    }

    if let Some(reason) = &report.source_error {
        bail!("无法读取员工文件 {}: {}", cli.file.display(), reason);
    }
    Ok(())
}

fn run_import<R: EmployeeRepository>(
    repo: R,
    settings: ImportSettings,
    file: &Path,
) -> Result<ImportReport> {
    let importer = EmployeeImporterImpl::new(repo, settings);
    let report = importer
        .import_from_file(file)
        .with_context(|| format!("导入失败: {}", file.display()))?;
    Ok(report)
}

fn print_text(report: &ImportReport) {
    let s = report.summary();
    println!("批次: {}", report.batch.batch_id);
    println!(
        "共 {} 行: 接受 {}（经理 {} / 技术员 {} / 销售代表 {}），拒绝 {}，跳过 {}",
        s.total_lines, s.accepted, s.managers, s.technicians, s.sales_reps, s.rejected, s.skipped
    );
    for d in &report.diagnostics {
        println!("  {}", d);
    }
}

fn print_json(report: &ImportReport) -> Result<()> {
    let value = json!({
        "batch": report.batch,
        "records": report.records,
        "diagnostics": report.diagnostics,
        "source_error": report.source_error,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
