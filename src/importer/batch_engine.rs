// ==========================================
// 员工批量导入 - 批次引擎
// ==========================================
// 职责: 按文件顺序逐行分类、解析，汇总已接受记录与诊断
// 红线:
// - 单行失败只产生诊断，绝不中断批次
// - 行来源不可用时返回空结果并记录错误日志
// - 不落库（由 EmployeeImporterImpl 负责）
// ==========================================

use crate::config::ImportSettings;
use crate::domain::import_batch::{BatchOutcome, Diagnostic};
use crate::importer::employee_importer_trait::LineSource;
use crate::importer::error::LineError;
use crate::importer::field_grammar::FieldGrammar;
use crate::importer::line_classifier::LineClassifier;
use std::collections::HashMap;
use tracing::{debug, error, warn};

pub struct BatchEngine {
    classifier: LineClassifier,
    settings: ImportSettings,
}

impl BatchEngine {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            classifier: LineClassifier::new(FieldGrammar::default()),
            settings,
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// 从行来源读取并运行批次
    pub fn run(&self, source: &dyn LineSource) -> BatchOutcome {
        match source.read_lines() {
            Ok(lines) => self.run_lines(lines),
            Err(e) => {
                error!(source = %source.label(), error = %e, "行来源不可用，批次结果为空");
                BatchOutcome::source_unavailable(e.to_string())
            }
        }
    }

    /// 按顺序处理行序列
    ///
    /// 技术员只能引用在其之前已接受的经理，因此处理顺序即文件顺序。
    pub fn run_lines<I, S>(&self, lines: I) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = BatchOutcome::default();
        // 编号 -> 首次接受的行号
        let mut seen_ids: HashMap<String, usize> = HashMap::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_number = index + 1;
            outcome.total_lines += 1;

            if self.settings.skip_blank_lines && line.trim().is_empty() {
                debug!(line_number, "跳过空白行");
                outcome.skipped_lines += 1;
                continue;
            }

            let parsed = self
                .classifier
                .dispatch(line, &outcome.records)
                .and_then(|employee| {
                    if !self.settings.enforce_unique_ids {
                        return Ok(employee);
                    }
                    match seen_ids.get(employee.id()) {
                        Some(&first_line) => Err(LineError::DuplicateIdentifier {
                            id: employee.id().to_string(),
                            first_line,
                        }),
                        None => {
                            seen_ids.insert(employee.id().to_string(), line_number);
                            Ok(employee)
                        }
                    }
                });

            match parsed {
                Ok(employee) => {
                    debug!(line_number, id = employee.id(), kind = ?employee.kind(), "接受记录");
                    outcome.records.push(employee);
                }
                Err(err) => {
                    let diagnostic = Diagnostic::new(line_number, line, err);
                    warn!(
                        line_number,
                        code = diagnostic.code(),
                        reason = %diagnostic.reason,
                        "拒绝行"
                    );
                    outcome.diagnostics.push(diagnostic);
                }
            }
        }

        outcome
    }
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{Employee, EmployeeKind};
    use crate::importer::file_parser::MemoryLineSource;

    #[test]
    fn test_mixed_batch_keeps_file_order() {
        let engine = BatchEngine::default();
        let outcome = engine.run_lines([
            "M00001,Dupont,Jean,01/01/2000,3000",
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
            "X00009,Foo,Bar,01/01/2000,100",
            "C00003,Durand,Anne,05/06/2015,2500,12000,80",
        ]);

        let ids: Vec<&str> = outcome.records.iter().map(Employee::id).collect();
        assert_eq!(ids, ["M00001", "T00002", "C00003"]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].line_number, 3);
        assert_eq!(outcome.diagnostics[0].code(), "UNKNOWN_RECORD_KIND");
        assert_eq!(outcome.total_lines, 4);
    }

    #[test]
    fn test_forward_manager_reference_rejected() {
        let engine = BatchEngine::default();
        let outcome = engine.run_lines([
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
            "M00001,Dupont,Jean,01/01/2000,3000",
        ]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].kind(), EmployeeKind::Manager);
        assert_eq!(outcome.diagnostics[0].line_number, 1);
        assert_eq!(outcome.diagnostics[0].code(), "MANAGER_NOT_FOUND");
    }

    #[test]
    fn test_rejected_manager_cannot_be_referenced() {
        let engine = BatchEngine::default();
        let outcome = engine.run_lines([
            "M00001,Dupont,Jean,2000-01-01,3000",
            "T00002,Martin,Paul,01/02/2010,2000,3,M00001",
        ]);

        assert!(outcome.records.is_empty());
        let codes: Vec<&str> = outcome.diagnostics.iter().map(Diagnostic::code).collect();
        assert_eq!(codes, ["INVALID_DATE_FORMAT", "MANAGER_NOT_FOUND"]);
    }

    #[test]
    fn test_blank_line_handling() {
        let lines = ["M00001,Dupont,Jean,01/01/2000,3000", "", "   "];

        let outcome = BatchEngine::default().run_lines(lines);
        assert_eq!(outcome.diagnostics.len(), 2);
        assert_eq!(outcome.skipped_lines, 0);

        let engine = BatchEngine::new(ImportSettings {
            skip_blank_lines: true,
            ..ImportSettings::default()
        });
        let outcome = engine.run_lines(lines);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.skipped_lines, 2);
        assert_eq!(outcome.total_lines, 3);
    }

    #[test]
    fn test_duplicate_ids_only_rejected_when_enforced() {
        let lines = [
            "M00001,Dupont,Jean,01/01/2000,3000",
            "M00001,Bernard,Luc,01/01/2005,3200",
        ];

        let outcome = BatchEngine::default().run_lines(lines);
        assert_eq!(outcome.records.len(), 2);

        let engine = BatchEngine::new(ImportSettings {
            enforce_unique_ids: true,
            ..ImportSettings::default()
        });
        let outcome = engine.run_lines(lines);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].error,
            LineError::DuplicateIdentifier {
                id: "M00001".to_string(),
                first_line: 1
            }
        );
    }

    #[test]
    fn test_grade_range_independent_of_settings() {
        let engine = BatchEngine::new(ImportSettings {
            skip_blank_lines: true,
            enforce_unique_ids: true,
        });
        let outcome = engine.run_lines([
            "M00001,Dupont,Jean,01/01/2000,3000",
            "T00002,Martin,Paul,01/02/2010,2000,8,M00001",
        ]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].error,
            LineError::GradeOutOfRange { value: 8, min: 1, max: 5 }
        );
    }

    #[test]
    fn test_run_from_memory_source() {
        let source = MemoryLineSource::from_text(
            "inline",
            "M00001,Dupont,Jean,01/01/2000,3000\nC00003,Durand,Anne,05/06/2015,2500,12000,80",
        );
        let outcome = BatchEngine::default().run(&source);
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.source_error.is_none());
    }

    #[test]
    fn test_empty_input_gives_empty_outcome() {
        let outcome = BatchEngine::default().run_lines(Vec::<String>::new());
        assert!(outcome.is_empty());
        assert_eq!(outcome.total_lines, 0);
    }
}
