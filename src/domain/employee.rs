// ==========================================
// 员工批量导入 - 员工领域模型
// ==========================================
// 三类员工: 经理(M) / 技术员(T) / 销售代表(C)
// 红线: 记录在被接受后不可变
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// EmployeeKind - 员工类别（行首判别字符）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeKind {
    Manager,    // M
    Technician, // T
    SalesRep,   // C
}

impl EmployeeKind {
    pub const ALL: [EmployeeKind; 3] = [
        EmployeeKind::Manager,
        EmployeeKind::Technician,
        EmployeeKind::SalesRep,
    ];

    /// 行首判别字符（同时也是员工编号前缀）
    pub fn discriminator(&self) -> char {
        match self {
            EmployeeKind::Manager => 'M',
            EmployeeKind::Technician => 'T',
            EmployeeKind::SalesRep => 'C',
        }
    }

    /// 由判别字符反查类别，未知字符返回 None
    pub fn from_discriminator(c: char) -> Option<Self> {
        match c {
            'M' => Some(EmployeeKind::Manager),
            'T' => Some(EmployeeKind::Technician),
            'C' => Some(EmployeeKind::SalesRep),
            _ => None,
        }
    }

    /// 该类别一行应包含的字段数
    pub fn field_count(&self) -> usize {
        match self {
            EmployeeKind::Manager => 5,
            EmployeeKind::Technician => 7,
            EmployeeKind::SalesRep => 7,
        }
    }

    /// 数据库存储口径
    pub fn as_db_str(&self) -> &'static str {
        match self {
            EmployeeKind::Manager => "MANAGER",
            EmployeeKind::Technician => "TECHNICIAN",
            EmployeeKind::SalesRep => "SALES_REP",
        }
    }

    pub fn from_db_str(raw: &str) -> Option<Self> {
        match raw.trim() {
            "MANAGER" => Some(EmployeeKind::Manager),
            "TECHNICIAN" => Some(EmployeeKind::Technician),
            "SALES_REP" => Some(EmployeeKind::SalesRep),
            _ => None,
        }
    }
}

impl fmt::Display for EmployeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeKind::Manager => write!(f, "经理"),
            EmployeeKind::Technician => write!(f, "技术员"),
            EmployeeKind::SalesRep => write!(f, "销售代表"),
        }
    }
}

// ==========================================
// EmployeeBase - 三类员工共有字段
// ==========================================
// 列序: [编号, 姓, 名, 入职日期, 基本工资]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeBase {
    pub id: String,            // 员工编号（判别字母 + 5 位数字）
    pub last_name: String,     // 姓
    pub first_name: String,    // 名
    pub hire_date: NaiveDate,  // 入职日期
    pub salary: f64,           // 基本工资
}

// ==========================================
// Manager - 经理
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(flatten)]
    pub base: EmployeeBase,
}

// ==========================================
// Technician - 技术员
// ==========================================
// manager 为解析时在已接受记录中找到的经理快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    #[serde(flatten)]
    pub base: EmployeeBase,
    pub grade: u32,
    pub manager: Manager,
}

impl Technician {
    pub fn manager_id(&self) -> &str {
        &self.manager.base.id
    }
}

// ==========================================
// SalesRep - 销售代表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRep {
    #[serde(flatten)]
    pub base: EmployeeBase,
    pub annual_revenue: f64,  // 年营业额
    pub performance: u32,     // 业绩指数
}

// ==========================================
// Employee - 员工（带标签的联合类型）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Employee {
    Manager(Manager),
    Technician(Technician),
    SalesRep(SalesRep),
}

impl Employee {
    pub fn kind(&self) -> EmployeeKind {
        match self {
            Employee::Manager(_) => EmployeeKind::Manager,
            Employee::Technician(_) => EmployeeKind::Technician,
            Employee::SalesRep(_) => EmployeeKind::SalesRep,
        }
    }

    pub fn base(&self) -> &EmployeeBase {
        match self {
            Employee::Manager(m) => &m.base,
            Employee::Technician(t) => &t.base,
            Employee::SalesRep(s) => &s.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn as_manager(&self) -> Option<&Manager> {
        match self {
            Employee::Manager(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(id: &str) -> EmployeeBase {
        EmployeeBase {
            id: id.to_string(),
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            salary: 3000.0,
        }
    }

    #[test]
    fn test_discriminator_round_trip() {
        for kind in EmployeeKind::ALL {
            assert_eq!(EmployeeKind::from_discriminator(kind.discriminator()), Some(kind));
            assert_eq!(EmployeeKind::from_db_str(kind.as_db_str()), Some(kind));
        }
        assert_eq!(EmployeeKind::from_discriminator('X'), None);
    }

    #[test]
    fn test_field_counts() {
        assert_eq!(EmployeeKind::Manager.field_count(), 5);
        assert_eq!(EmployeeKind::Technician.field_count(), 7);
        assert_eq!(EmployeeKind::SalesRep.field_count(), 7);
    }

    #[test]
    fn test_technician_serializes_with_kind_tag() {
        let manager = Manager { base: base("M00001") };
        let tech = Employee::Technician(Technician {
            base: base("T00002"),
            grade: 3,
            manager: manager.clone(),
        });

        let json = serde_json::to_value(&tech).unwrap();
        assert_eq!(json["kind"], "TECHNICIAN");
        assert_eq!(json["id"], "T00002");
        assert_eq!(json["manager"]["id"], "M00001");

        let back: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(back, tech);
    }

    #[test]
    fn test_as_manager() {
        let m = Employee::Manager(Manager { base: base("M00001") });
        assert!(m.as_manager().is_some());
        assert_eq!(m.id(), "M00001");
        assert_eq!(m.kind(), EmployeeKind::Manager);
    }
}
