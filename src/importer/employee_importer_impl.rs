// ==========================================
// 员工批量导入 - 导入器实现
// ==========================================
// 职责: 整合导入流程，从行来源到数据库
// 流程: 读取行 → 分类 → 解析校验 → 汇总诊断 → 落库
// ==========================================

use crate::config::{ImportConfigReader, ImportSettings};
use crate::domain::import_batch::{BatchStatus, ImportBatch, ImportReport};
use crate::importer::batch_engine::BatchEngine;
use crate::importer::employee_importer_trait::{EmployeeImporter, LineSource};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::FileLineSource;
use crate::repository::EmployeeRepository;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EmployeeImporterImpl - 员工导入器实现
// ==========================================
pub struct EmployeeImporterImpl<R>
where
    R: EmployeeRepository,
{
    // 数据访问层
    repo: R,

    // 批次引擎（持有配置快照）
    engine: BatchEngine,
}

impl<R> EmployeeImporterImpl<R>
where
    R: EmployeeRepository,
{
    /// 创建新的 EmployeeImporter 实例
    ///
    /// # 参数
    /// - repo: 员工数据仓储
    /// - settings: 导入配置快照
    pub fn new(repo: R, settings: ImportSettings) -> Self {
        Self {
            repo,
            engine: BatchEngine::new(settings),
        }
    }

    /// 从配置读取器创建（读取并校验配置）
    pub fn from_config<C: ImportConfigReader + ?Sized>(repo: R, config: &C) -> ImportResult<Self> {
        let settings = config.load_settings()?;
        debug!(?settings, "导入配置已加载");
        Ok(Self::new(repo, settings))
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn settings(&self) -> &ImportSettings {
        self.engine.settings()
    }
}

impl<R> EmployeeImporter for EmployeeImporterImpl<R>
where
    R: EmployeeRepository,
{
    #[instrument(skip(self, source), fields(source = %source.label(), batch_id))]
    fn import_from_source(&self, source: &dyn LineSource) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, "开始导入员工数据");

        // === 步骤 1: 批次引擎 ===
        debug!("步骤 1: 逐行分类与解析");
        let outcome = self.engine.run(source);
        let summary = outcome.summary();
        info!(
            total = summary.total_lines,
            accepted = summary.accepted,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "逐行解析完成"
        );

        let status = if outcome.source_error.is_some() {
            BatchStatus::SourceUnavailable
        } else {
            BatchStatus::Completed
        };

        let elapsed_time = start_time.elapsed();
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            source_label: source.label(),
            status,
            summary,
            imported_at: Utc::now(),
            elapsed_ms: elapsed_time.as_millis() as i64,
        };

        // === 步骤 2: 落库 ===
        // 来源不可用时结果为空，不写入任何记录
        if status == BatchStatus::SourceUnavailable {
            warn!(batch_id = %batch_id, "行来源不可用，跳过落库");
        } else {
            debug!("步骤 2: 落库");
            let saved = self
                .repo
                .save_batch(&batch, &outcome.records, &outcome.diagnostics)?;
            debug!(count = saved, "员工落库完成");
        }

        info!(
            batch_id = %batch_id,
            accepted = batch.summary.accepted,
            rejected = batch.summary.rejected,
            managers = batch.summary.managers,
            technicians = batch.summary.technicians,
            sales_reps = batch.summary.sales_reps,
            elapsed_ms = batch.elapsed_ms,
            "员工数据导入完成"
        );

        Ok(ImportReport {
            batch,
            records: outcome.records,
            diagnostics: outcome.diagnostics,
            source_error: outcome.source_error,
            elapsed_time,
        })
    }

    fn import_from_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport> {
        let source = FileLineSource::new(file_path);
        self.import_from_source(&source)
    }
}
