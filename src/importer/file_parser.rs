// ==========================================
// 员工批量导入 - 行来源实现
// ==========================================
// 支持: 文本文件 (.csv / .txt，UTF-8) / 内存行
// 格式: 无表头，一行一条记录
// ==========================================

use crate::importer::employee_importer_trait::LineSource;
use crate::importer::error::{ImportError, ImportResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

// ==========================================
// FileLineSource - 文件行来源
// ==========================================
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileLineSource {
    fn read_lines(&self) -> ImportResult<Vec<String>> {
        let path = self.path.as_path();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名（无扩展名视为文本）
        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if ext != "csv" && ext != "txt" {
                return Err(ImportError::UnsupportedFormat(ext));
            }
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }

        // 去掉首行 BOM，否则首行判别字符会被识别为未知类型
        if let Some(first) = lines.first_mut() {
            if first.starts_with(UTF8_BOM) {
                first.remove(0);
            }
        }

        Ok(lines)
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

// ==========================================
// MemoryLineSource - 内存行来源
// ==========================================
pub struct MemoryLineSource {
    label: String,
    lines: Vec<String>,
}

impl MemoryLineSource {
    pub fn new<I, S>(label: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// 按换行拆分一段文本
    pub fn from_text(label: impl Into<String>, text: &str) -> Self {
        Self::new(label, text.lines())
    }
}

impl LineSource for MemoryLineSource {
    fn read_lines(&self) -> ImportResult<Vec<String>> {
        Ok(self.lines.clone())
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
