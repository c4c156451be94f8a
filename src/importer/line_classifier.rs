// ==========================================
// 员工批量导入 - 行分类器
// ==========================================
// 职责: 读取行首判别字符，分派到对应的记录解析器
// 红线: 纯分派，不做字段校验
// ==========================================

use crate::domain::employee::{Employee, EmployeeKind};
use crate::importer::employee_importer_trait::RecordParser;
use crate::importer::error::{LineError, LineResult};
use crate::importer::field_grammar::FieldGrammar;
use crate::importer::record_parser::{ManagerParser, SalesRepParser, TechnicianParser};

pub struct LineClassifier {
    manager: Box<dyn RecordParser>,
    technician: Box<dyn RecordParser>,
    sales_rep: Box<dyn RecordParser>,
}

impl LineClassifier {
    /// 使用默认的三类解析器
    pub fn new(grammar: FieldGrammar) -> Self {
        Self {
            manager: Box::new(ManagerParser::new(grammar)),
            technician: Box::new(TechnicianParser::new(grammar)),
            sales_rep: Box::new(SalesRepParser::new(grammar)),
        }
    }

    /// 按行首字符判定类别（空行与未知字符均为 UnknownRecordKind）
    pub fn classify(line: &str) -> LineResult<EmployeeKind> {
        line.chars()
            .next()
            .and_then(EmployeeKind::from_discriminator)
            .ok_or_else(|| LineError::UnknownRecordKind {
                line: line.to_string(),
            })
    }

    pub fn parser_for(&self, kind: EmployeeKind) -> &dyn RecordParser {
        match kind {
            EmployeeKind::Manager => self.manager.as_ref(),
            EmployeeKind::Technician => self.technician.as_ref(),
            EmployeeKind::SalesRep => self.sales_rep.as_ref(),
        }
    }

    /// 分类并解析一行
    pub fn dispatch(&self, line: &str, accepted: &[Employee]) -> LineResult<Employee> {
        let kind = Self::classify(line)?;
        self.parser_for(kind).parse(line, accepted)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(FieldGrammar::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_discriminators() {
        assert_eq!(LineClassifier::classify("M00001,...").unwrap(), EmployeeKind::Manager);
        assert_eq!(LineClassifier::classify("T00001,...").unwrap(), EmployeeKind::Technician);
        assert_eq!(LineClassifier::classify("C00001,...").unwrap(), EmployeeKind::SalesRep);
    }

    #[test]
    fn test_classify_unknown_and_empty() {
        for line in ["X00001,Foo,Bar,01/01/2000,100", "", " M00001", "m00001"] {
            assert_eq!(
                LineClassifier::classify(line).unwrap_err(),
                LineError::UnknownRecordKind {
                    line: line.to_string()
                }
            );
        }
    }

    #[test]
    fn test_parser_for_matches_kind() {
        let classifier = LineClassifier::default();
        for kind in EmployeeKind::ALL {
            assert_eq!(classifier.parser_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_dispatch_routes_to_parser() {
        let classifier = LineClassifier::default();

        let employee = classifier
            .dispatch("C00003,Durand,Anne,05/06/2015,2500,12000,80", &[])
            .unwrap();
        assert_eq!(employee.kind(), EmployeeKind::SalesRep);

        // 分派后由解析器校验字段数
        let err = classifier.dispatch("M00001,Dupont", &[]).unwrap_err();
        assert!(matches!(err, LineError::WrongFieldCount { .. }));
    }
}
