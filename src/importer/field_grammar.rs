// ==========================================
// 员工批量导入 - 字段语法
// ==========================================
// 职责: 每类语义字段的声明式规则（正则 / 范围 / 格式）+ 类型转换
// 红线: 规则只看单个字段原始值，不访问其他行
// ==========================================

use crate::importer::error::{LineError, LineResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// 入职日期格式（dd/MM/yyyy）
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// 技术员等级下限（含）
pub const GRADE_MIN: u32 = 1;

/// 技术员等级上限（含）
pub const GRADE_MAX: u32 = 5;

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[MTC][0-9]{5}$").expect("identifier pattern"));

static PERSON_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\- ]+$").expect("person name pattern"));

// chrono 的 %d/%m/%Y 接受非补零数字，先用正则锁定 2/2/4 位
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("date pattern"));

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("amount pattern"));

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern"));

// ==========================================
// NameField - 姓名字段位置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    LastName,  // 字段 1
    FirstName, // 字段 2
}

impl NameField {
    pub fn label(&self) -> &'static str {
        match self {
            NameField::LastName => "姓",
            NameField::FirstName => "名",
        }
    }
}

// ==========================================
// FieldRule - 语义字段规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Identifier { prefix: char },
    PersonName(NameField),
    HireDate,
    Salary,
    Revenue,
    PerformanceIndex,
    Grade,
}

// ==========================================
// FieldGrammar - 字段语法
// ==========================================
// 规则固定，不随配置变化
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldGrammar;

impl FieldGrammar {
    /// 校验单个字段（只判定，不返回转换值）
    pub fn validate(&self, rule: FieldRule, raw: &str) -> LineResult<()> {
        match rule {
            FieldRule::Identifier { prefix } => self.identifier(raw, prefix).map(|_| ()),
            FieldRule::PersonName(field) => self.person_name(raw, field).map(|_| ()),
            FieldRule::HireDate => self.hire_date(raw).map(|_| ()),
            FieldRule::Salary => self.salary(raw).map(|_| ()),
            FieldRule::Revenue => self.revenue(raw).map(|_| ()),
            FieldRule::PerformanceIndex => self.performance(raw).map(|_| ()),
            FieldRule::Grade => self.grade(raw).map(|_| ()),
        }
    }

    /// 员工编号: 6 个字符，首字母为指定前缀，其余 5 位为 ASCII 数字
    pub fn identifier(&self, raw: &str, prefix: char) -> LineResult<String> {
        if IDENTIFIER_PATTERN.is_match(raw) && raw.starts_with(prefix) {
            Ok(raw.to_string())
        } else {
            Err(LineError::InvalidIdentifierFormat {
                value: raw.to_string(),
                expected_prefix: prefix,
            })
        }
    }

    /// 姓名: 一个或多个 Unicode 字母、连字符或空格
    pub fn person_name(&self, raw: &str, field: NameField) -> LineResult<String> {
        if PERSON_NAME_PATTERN.is_match(raw) {
            Ok(raw.to_string())
        } else {
            Err(LineError::InvalidName {
                field: field.label().to_string(),
                value: raw.to_string(),
            })
        }
    }

    /// 入职日期: dd/MM/yyyy，且必须是合法日历日期
    pub fn hire_date(&self, raw: &str) -> LineResult<NaiveDate> {
        if !DATE_PATTERN.is_match(raw) {
            return Err(LineError::InvalidDateFormat {
                value: raw.to_string(),
            });
        }

        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| LineError::InvalidDateFormat {
            value: raw.to_string(),
        })
    }

    /// 基本工资: 非负金额
    pub fn salary(&self, raw: &str) -> LineResult<f64> {
        parse_amount(raw).ok_or_else(|| LineError::InvalidSalary {
            value: raw.to_string(),
        })
    }

    /// 年营业额: 非负金额
    pub fn revenue(&self, raw: &str) -> LineResult<f64> {
        parse_amount(raw).ok_or_else(|| LineError::InvalidRevenue {
            value: raw.to_string(),
        })
    }

    /// 业绩指数: 非负整数
    pub fn performance(&self, raw: &str) -> LineResult<u32> {
        parse_non_negative(raw).ok_or_else(|| LineError::InvalidPerformanceIndex {
            value: raw.to_string(),
        })
    }

    /// 技术员等级: 先判定整数格式，再判定区间（两类错误分开报告）
    pub fn grade(&self, raw: &str) -> LineResult<u32> {
        let value = parse_non_negative(raw).ok_or_else(|| LineError::InvalidGradeFormat {
            value: raw.to_string(),
        })?;

        if !(GRADE_MIN..=GRADE_MAX).contains(&value) {
            return Err(LineError::GradeOutOfRange {
                value,
                min: GRADE_MIN,
                max: GRADE_MAX,
            });
        }

        Ok(value)
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    if !AMOUNT_PATTERN.is_match(raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_non_negative(raw: &str) -> Option<u32> {
    if !INTEGER_PATTERN.is_match(raw) {
        return None;
    }
    raw.parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_valid() {
        let g = FieldGrammar::default();
        assert_eq!(g.identifier("M00001", 'M').unwrap(), "M00001");
        assert_eq!(g.identifier("T12345", 'T').unwrap(), "T12345");
        assert_eq!(g.identifier("C99999", 'C').unwrap(), "C99999");
    }

    #[test]
    fn test_identifier_rejects_wrong_prefix_and_shape() {
        let g = FieldGrammar::default();
        for raw in ["T00001", "M0001", "M000001", "M0000A", "m00001", "", "X00001", "M００００１"] {
            let err = g.identifier(raw, 'M').unwrap_err();
            assert!(
                matches!(err, LineError::InvalidIdentifierFormat { expected_prefix: 'M', .. }),
                "raw={raw}"
            );
        }
    }

    #[test]
    fn test_person_name() {
        let g = FieldGrammar::default();
        assert!(g.person_name("Dupont", NameField::LastName).is_ok());
        assert!(g.person_name("Jean-Pierre", NameField::FirstName).is_ok());
        assert!(g.person_name("Le Gall", NameField::LastName).is_ok());
        assert!(g.person_name("Hélène", NameField::FirstName).is_ok());

        let err = g.person_name("Dup0nt", NameField::LastName).unwrap_err();
        assert_eq!(
            err,
            LineError::InvalidName {
                field: "姓".to_string(),
                value: "Dup0nt".to_string()
            }
        );
        assert!(g.person_name("O'Neil", NameField::LastName).is_err());
        assert!(g.person_name("", NameField::FirstName).is_err());
    }

    #[test]
    fn test_hire_date() {
        let g = FieldGrammar::default();
        assert_eq!(
            g.hire_date("15/03/1988").unwrap(),
            NaiveDate::from_ymd_opt(1988, 3, 15).unwrap()
        );
        assert_eq!(
            g.hire_date("29/02/2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );

        for raw in ["31/02/2020", "1/03/1988", "15-03-1988", "15/03/88", "1988/03/15", "", "32/01/2000"] {
            assert!(
                matches!(g.hire_date(raw), Err(LineError::InvalidDateFormat { .. })),
                "raw={raw}"
            );
        }
    }

    #[test]
    fn test_amounts() {
        let g = FieldGrammar::default();
        assert_eq!(g.salary("3000").unwrap(), 3000.0);
        assert_eq!(g.salary("2500.75").unwrap(), 2500.75);
        assert_eq!(g.revenue("0").unwrap(), 0.0);

        for raw in ["-1", "abc", "", "1e5", "NaN", "inf", "12,5", "1.2.3", " 100"] {
            assert!(matches!(g.salary(raw), Err(LineError::InvalidSalary { .. })), "raw={raw}");
            assert!(matches!(g.revenue(raw), Err(LineError::InvalidRevenue { .. })), "raw={raw}");
        }
    }

    #[test]
    fn test_performance() {
        let g = FieldGrammar::default();
        assert_eq!(g.performance("0").unwrap(), 0);
        assert_eq!(g.performance("120").unwrap(), 120);
        for raw in ["-3", "1.5", "abc", ""] {
            assert!(
                matches!(g.performance(raw), Err(LineError::InvalidPerformanceIndex { .. })),
                "raw={raw}"
            );
        }
    }

    #[test]
    fn test_grade_format_and_range_are_distinct() {
        let g = FieldGrammar::default();
        for raw in ["1", "3", "5"] {
            assert!(g.grade(raw).is_ok());
        }

        assert_eq!(
            g.grade("0").unwrap_err(),
            LineError::GradeOutOfRange { value: 0, min: 1, max: 5 }
        );
        assert_eq!(
            g.grade("6").unwrap_err(),
            LineError::GradeOutOfRange { value: 6, min: 1, max: 5 }
        );
        for raw in ["abc", "2.5", "-1", ""] {
            assert!(matches!(g.grade(raw), Err(LineError::InvalidGradeFormat { .. })), "raw={raw}");
        }
    }

    #[test]
    fn test_validate_dispatches_rule() {
        let g = FieldGrammar::default();
        assert!(g.validate(FieldRule::Identifier { prefix: 'M' }, "M00001").is_ok());
        assert!(g.validate(FieldRule::HireDate, "01/01/2000").is_ok());
        assert!(matches!(
            g.validate(FieldRule::Grade, "9"),
            Err(LineError::GradeOutOfRange { .. })
        ));
        assert!(matches!(
            g.validate(FieldRule::PersonName(NameField::FirstName), "J3an"),
            Err(LineError::InvalidName { .. })
        ));
    }
}
