// 技术员: [编号, 姓, 名, 入职日期, 基本工资, 等级, 经理编号]
// 经理必须已在本批次已接受记录中（不支持前向引用）

use super::{parse_base_fields, split_fields};
use crate::domain::employee::{Employee, EmployeeKind, Manager, Technician};
use crate::importer::employee_importer_trait::RecordParser;
use crate::importer::error::{LineError, LineResult};
use crate::importer::field_grammar::FieldGrammar;

const MANAGER_PREFIX: char = 'M';

pub struct TechnicianParser {
    grammar: FieldGrammar,
}

impl TechnicianParser {
    pub fn new(grammar: FieldGrammar) -> Self {
        Self { grammar }
    }
}

impl RecordParser for TechnicianParser {
    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Technician
    }

    fn parse(&self, line: &str, accepted: &[Employee]) -> LineResult<Employee> {
        let fields = split_fields(line, self.kind())?;
        let base = parse_base_fields(&self.grammar, &fields, self.kind())?;

        let grade = self.grammar.grade(fields[5])?;
        let manager_id = self.grammar.identifier(fields[6], MANAGER_PREFIX)?;

        let manager = find_manager(accepted, &manager_id).ok_or(LineError::ManagerNotFound {
            reference: manager_id,
        })?;

        Ok(Employee::Technician(Technician {
            base,
            grade,
            manager: manager.clone(),
        }))
    }
}

/// 在已接受记录中查找经理；编号重复时取最近接受的一条
fn find_manager<'a>(accepted: &'a [Employee], manager_id: &str) -> Option<&'a Manager> {
    accepted
        .iter()
        .rev()
        .filter_map(Employee::as_manager)
        .find(|m| m.base.id == manager_id)
}
