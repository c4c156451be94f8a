// ==========================================
// 员工批量导入 - 拒绝行报告
// ==========================================
// 输出: CSV（含表头），原始行中的逗号由 csv 写入器加引号
// 列: line_number,error_code,reason,raw_line
// ==========================================

use crate::domain::import_batch::Diagnostic;
use crate::importer::error::{ImportError, ImportResult};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

const REPORT_HEADER: &[&str] = &["line_number", "error_code", "reason", "raw_line"];

/// 将诊断写入任意输出
pub fn write_rejections<W: Write>(writer: W, diagnostics: &[Diagnostic]) -> ImportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(REPORT_HEADER)?;

    for d in diagnostics {
        let line_number = d.line_number.to_string();
        wtr.write_record([
            line_number.as_str(),
            d.code(),
            d.reason.as_str(),
            d.raw_line.as_str(),
        ])?;
    }

    wtr.flush()
        .map_err(|e| ImportError::ReportWriteError(e.to_string()))?;
    Ok(())
}

/// 将诊断写入文件（覆盖）
pub fn write_rejections_to_path<P: AsRef<Path>>(
    path: P,
    diagnostics: &[Diagnostic],
) -> ImportResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| ImportError::ReportWriteError(format!("{}: {}", path.display(), e)))?;
    write_rejections(file, diagnostics)?;

    info!(path = %path.display(), rejected = diagnostics.len(), "拒绝行报告已写出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::LineError;

    #[test]
    fn test_report_quotes_raw_line() {
        let diagnostics = vec![Diagnostic::new(
            2,
            "X00001,Foo,Bar",
            LineError::UnknownRecordKind {
                line: "X00001,Foo,Bar".to_string(),
            },
        )];

        let mut buf = Vec::new();
        write_rejections(&mut buf, &diagnostics).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("line_number,error_code,reason,raw_line"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2,UNKNOWN_RECORD_KIND,"));
        assert!(row.ends_with("\"X00001,Foo,Bar\""));
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rejects.csv");
        write_rejections_to_path(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "line_number,error_code,reason,raw_line\n");
    }
}
