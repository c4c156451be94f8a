// ==========================================
// 员工批量导入 - 记录解析器
// ==========================================
// 公共流程（所有类别先执行）:
//   1. 按逗号切分字段（丢弃末尾空字段）
//   2. 校验字段数
//   3-7. 编号 / 姓 / 名 / 入职日期 / 基本工资
// 任一失败立即返回，报告第一个违反的规则
// ==========================================

mod manager;
mod sales_rep;
mod technician;

pub use manager::ManagerParser;
pub use sales_rep::SalesRepParser;
pub use technician::TechnicianParser;

use crate::domain::employee::{EmployeeBase, EmployeeKind};
use crate::importer::error::{LineError, LineResult};
use crate::importer::field_grammar::{FieldGrammar, NameField};

/// 字段分隔符（不支持引号转义）
pub const FIELD_DELIMITER: char = ',';

/// 切分字段并校验字段数
pub(crate) fn split_fields(line: &str, kind: EmployeeKind) -> LineResult<Vec<&str>> {
    let mut fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    let expected = kind.field_count();
    if fields.len() != expected {
        return Err(LineError::WrongFieldCount {
            kind,
            expected,
            actual: fields.len(),
        });
    }

    Ok(fields)
}

/// 解析公共字段（字段 0-4），调用方需先通过 split_fields
pub(crate) fn parse_base_fields(
    grammar: &FieldGrammar,
    fields: &[&str],
    kind: EmployeeKind,
) -> LineResult<EmployeeBase> {
    let id = grammar.identifier(fields[0], kind.discriminator())?;
    let last_name = grammar.person_name(fields[1], NameField::LastName)?;
    let first_name = grammar.person_name(fields[2], NameField::FirstName)?;
    let hire_date = grammar.hire_date(fields[3])?;
    let salary = grammar.salary(fields[4])?;

    Ok(EmployeeBase {
        id,
        last_name,
        first_name,
        hire_date,
        salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_split_fields_counts() {
        let fields = split_fields("M00001,Dupont,Jean,01/01/2000,3000", EmployeeKind::Manager).unwrap();
        assert_eq!(fields.len(), 5);

        let err = split_fields("M00001,Dupont,Jean,01/01/2000", EmployeeKind::Manager).unwrap_err();
        assert_eq!(
            err,
            LineError::WrongFieldCount {
                kind: EmployeeKind::Manager,
                expected: 5,
                actual: 4
            }
        );

    }

    #[test]
    fn test_split_fields_drops_trailing_empty_fields() {
        let fields =
            split_fields("M00001,Dupont,Jean,01/01/2000,3000,", EmployeeKind::Manager).unwrap();
        assert_eq!(fields, ["M00001", "Dupont", "Jean", "01/01/2000", "3000"]);

        let fields =
            split_fields("M00001,Dupont,Jean,01/01/2000,3000,,,", EmployeeKind::Manager).unwrap();
        assert_eq!(fields.len(), 5);

        // 中间空字段保留并参与计数
        let err = split_fields("M00001,,Jean,01/01/2000,3000,extra", EmployeeKind::Manager)
            .unwrap_err();
        assert!(matches!(err, LineError::WrongFieldCount { actual: 6, .. }));

        // 缺失的末尾字段不能靠逗号补齐
        let err = split_fields("M00001,Dupont,Jean,01/01/2000,,", EmployeeKind::Manager).unwrap_err();
        assert!(matches!(err, LineError::WrongFieldCount { actual: 4, .. }));
    }

    #[test]
    fn test_parse_base_fields() {
        let grammar = FieldGrammar::default();
        let fields = ["T00002", "Martin", "Paul", "01/02/2010", "2000.50"];

        let base = parse_base_fields(&grammar, &fields, EmployeeKind::Technician).unwrap();

        assert_eq!(base.id, "T00002");
        assert_eq!(base.last_name, "Martin");
        assert_eq!(base.first_name, "Paul");
        assert_eq!(base.hire_date, NaiveDate::from_ymd_opt(2010, 2, 1).unwrap());
        assert_eq!(base.salary, 2000.50);
    }

    #[test]
    fn test_parse_base_fields_reports_first_violation() {
        let grammar = FieldGrammar::default();
        // 姓、日期、工资同时非法，只报告姓
        let fields = ["M00001", "Dup0nt", "Jean", "99/99/2000", "abc"];

        let err = parse_base_fields(&grammar, &fields, EmployeeKind::Manager).unwrap_err();
        assert!(matches!(err, LineError::InvalidName { .. }));
    }

    #[test]
    fn test_parse_base_fields_prefix_must_match_kind() {
        let grammar = FieldGrammar::default();
        let fields = ["M00001", "Dupont", "Jean", "01/01/2000", "3000"];

        let err = parse_base_fields(&grammar, &fields, EmployeeKind::SalesRep).unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidIdentifierFormat { expected_prefix: 'C', .. }
        ));
    }
}
