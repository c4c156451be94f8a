// ==========================================
// 员工批量导入 - 配置层
// ==========================================
// 职责: 导入配置读取（等级范围、空行与编号唯一性策略）
// 存储: config_kv 表 / 静态 ImportSettings
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{ImportConfigReader, ImportSettings};
