use tracing::debug;

use crate::labels::{FieldId, LabelTable};
use crate::parser::rows::Row;
use crate::record::{Program, RegistrationCategory};

/// The English portal titles the registration-class row "Registration
/// Category", the same text as the section header. Inside this section that
/// text means the class row, so it is mapped before the table lookup.
pub const REGISTRATION_CLASS_ALIAS: &str = "Registration Category";

/// Canonical id of a row header inside the registration section.
pub fn resolve_row_header(header: &str, labels: &LabelTable) -> Option<FieldId> {
    if header.trim() == REGISTRATION_CLASS_ALIAS {
        return Some(FieldId::RegistrationClass);
    }
    labels.resolve(header)
}

/// Rows are `header | is | bs | ms | ds | dgi`, or `header | text` for the
/// requirements row.
pub fn extract(row: &Row, labels: &LabelTable, into: &mut RegistrationCategory) {
    let Some(header) = row.cells.first() else {
        return;
    };

    match resolve_row_header(&header.text, labels) {
        // column titles
        Some(FieldId::EducationPrograms) => {}
        Some(field @ (FieldId::RegistrationClass | FieldId::CoreSubjects)) => {
            let values = &row.cells[1..];
            if values.len() != Program::ALL.len() {
                debug!(cells = row.len(), %field, "Skipping registration row with unexpected shape");
                return;
            }
            for (program, cell) in Program::ALL.into_iter().zip(values) {
                let entry = into.programs.entry(program).or_default();
                let value = Some(cell.rich_text().to_string());
                match field {
                    FieldId::RegistrationClass => entry.registration_class = value,
                    _ => entry.core_subjects = value,
                }
            }
        }
        Some(FieldId::RegistrationRequirements) => match row.cells.get(1) {
            Some(cell) => into.registration_requirements = Some(cell.rich_text().to_string()),
            None => debug!("Registration requirements row without content"),
        },
        other => debug!(label = %header.text, resolved = ?other, "Ignoring registration row"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rows::Cell;

    fn program_row(header: &str, values: [&str; 5]) -> Row {
        let mut cells = vec![Cell::header(header)];
        cells.extend(values.into_iter().map(Cell::content));
        Row::new(cells)
    }

    #[test]
    fn alias_maps_to_registration_class() {
        let labels = LabelTable::new();
        assert_eq!(labels.resolve(REGISTRATION_CLASS_ALIAS), Some(FieldId::RegistrationCategory));
        assert_eq!(
            resolve_row_header(REGISTRATION_CLASS_ALIAS, &labels),
            Some(FieldId::RegistrationClass)
        );
        assert_eq!(resolve_row_header("履修区分", &labels), Some(FieldId::RegistrationClass));
    }

    #[test]
    fn core_subjects_per_program() {
        let labels = LabelTable::new();
        let mut rc = RegistrationCategory::default();
        extract(&program_row("コア科目", ["○", "", "○", "", "○"]), &labels, &mut rc);

        let core = |p: Program| rc.programs.get(&p).and_then(|e| e.core_subjects.as_deref());
        assert_eq!(core(Program::Is), Some("○"));
        assert_eq!(core(Program::Ms), Some("○"));
        assert_eq!(core(Program::Dgi), Some("○"));
        assert_eq!(core(Program::Bs), Some(""));
        assert_eq!(core(Program::Ds), Some(""));
    }

    #[test]
    fn english_class_row_uses_alias() {
        let labels = LabelTable::new();
        let mut rc = RegistrationCategory::default();
        let row = program_row("Registration Category", ["Required", "Elective", "", "", "Elective"]);
        extract(&row, &labels, &mut rc);
        assert_eq!(
            rc.programs[&Program::Is].registration_class.as_deref(),
            Some("Required")
        );
        assert_eq!(rc.programs[&Program::Is].core_subjects, None);
    }

    #[test]
    fn program_header_row_skipped() {
        let labels = LabelTable::new();
        let mut rc = RegistrationCategory::default();
        let row = Row::new(vec![
            Cell::header("Education Programs"),
            Cell::header("IS"),
            Cell::header("BS"),
            Cell::header("MS"),
            Cell::header("DS"),
            Cell::header("DGI"),
        ]);
        extract(&row, &labels, &mut rc);
        assert_eq!(rc, RegistrationCategory::default());
    }

    #[test]
    fn requirements_scalar() {
        let labels = LabelTable::new();
        let mut rc = RegistrationCategory::default();
        let row = Row::new(vec![Cell::header("履修方法"), Cell::content("事前登録\n抽選あり")]);
        extract(&row, &labels, &mut rc);
        assert_eq!(rc.registration_requirements.as_deref(), Some("事前登録\n抽選あり"));
        assert!(rc.programs.is_empty());
    }

    #[test]
    fn short_program_row_skipped() {
        let labels = LabelTable::new();
        let mut rc = RegistrationCategory::default();
        let row = Row::new(vec![Cell::header("Core Subjects"), Cell::content("○")]);
        extract(&row, &labels, &mut rc);
        assert!(rc.programs.is_empty());
    }
}
