// 销售代表: [编号, 姓, 名, 入职日期, 基本工资, 年营业额, 业绩指数]

use super::{parse_base_fields, split_fields};
use crate::domain::employee::{Employee, EmployeeKind, SalesRep};
use crate::importer::employee_importer_trait::RecordParser;
use crate::importer::error::LineResult;
use crate::importer::field_grammar::FieldGrammar;

pub struct SalesRepParser {
    grammar: FieldGrammar,
}

impl SalesRepParser {
    pub fn new(grammar: FieldGrammar) -> Self {
        Self { grammar }
    }
}

impl RecordParser for SalesRepParser {
    fn kind(&self) -> EmployeeKind {
        EmployeeKind::SalesRep
    }

    fn parse(&self, line: &str, _accepted: &[Employee]) -> LineResult<Employee> {
        let fields = split_fields(line, self.kind())?;
        let base = parse_base_fields(&self.grammar, &fields, self.kind())?;

        let annual_revenue = self.grammar.revenue(fields[5])?;
        let performance = self.grammar.performance(fields[6])?;

        Ok(Employee::SalesRep(SalesRep {
            base,
            annual_revenue,
            performance,
        }))
    }
}
