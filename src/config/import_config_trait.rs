// ==========================================
// 员工批量导入 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::error::ImportResult;
use serde::{Deserialize, Serialize};

// ==========================================
// ImportSettings - 导入配置快照
// ==========================================
// 只控制批次行为，字段规则（含等级范围）不可配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub skip_blank_lines: bool,   // 空白行计入跳过，而非 UnknownRecordKind
    pub enforce_unique_ids: bool, // 同批次内编号重复时拒绝后出现的行
}

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）/ ImportSettings（静态配置）
pub trait ImportConfigReader: Send + Sync {
    /// 是否跳过空白行
    ///
    /// # 默认值
    /// - false（空行报告为未知员工类型）
    fn get_skip_blank_lines(&self) -> ImportResult<bool>;

    /// 是否强制编号唯一
    ///
    /// # 默认值
    /// - false
    fn get_enforce_unique_ids(&self) -> ImportResult<bool>;

    /// 读取完整配置
    fn load_settings(&self) -> ImportResult<ImportSettings> {
        Ok(ImportSettings {
            skip_blank_lines: self.get_skip_blank_lines()?,
            enforce_unique_ids: self.get_enforce_unique_ids()?,
        })
    }
}

impl ImportConfigReader for ImportSettings {
    fn get_skip_blank_lines(&self) -> ImportResult<bool> {
        Ok(self.skip_blank_lines)
    }

    fn get_enforce_unique_ids(&self) -> ImportResult<bool> {
        Ok(self.enforce_unique_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ImportSettings::default();
        assert!(!settings.skip_blank_lines);
        assert!(!settings.enforce_unique_ids);
        assert_eq!(settings.load_settings().unwrap(), settings);
    }
}
