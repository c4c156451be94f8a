// 经理: [编号, 姓, 名, 入职日期, 基本工资]

use super::{parse_base_fields, split_fields};
use crate::domain::employee::{Employee, EmployeeKind, Manager};
use crate::importer::employee_importer_trait::RecordParser;
use crate::importer::error::LineResult;
use crate::importer::field_grammar::FieldGrammar;

pub struct ManagerParser {
    grammar: FieldGrammar,
}

impl ManagerParser {
    pub fn new(grammar: FieldGrammar) -> Self {
        Self { grammar }
    }
}

impl RecordParser for ManagerParser {
    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Manager
    }

    fn parse(&self, line: &str, _accepted: &[Employee]) -> LineResult<Employee> {
        let fields = split_fields(line, self.kind())?;
        let base = parse_base_fields(&self.grammar, &fields, self.kind())?;

        Ok(Employee::Manager(Manager { base }))
    }
}
