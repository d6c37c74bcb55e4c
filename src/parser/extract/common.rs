use std::collections::BTreeMap;

use tracing::debug;

use crate::labels::{FieldId, LabelTable};
use crate::parser::rows::Row;

/// `label | content` rows of the overview, textbook and other-information
/// sections.
pub fn extract(row: &Row, labels: &LabelTable, into: &mut BTreeMap<FieldId, String>) {
    let [key, value] = row.cells.as_slice() else {
        debug!(cells = row.len(), "Skipping label/content row with unexpected shape");
        return;
    };

    match labels.resolve(&key.text) {
        Some(id) => {
            into.insert(id, value.rich_text().to_string());
        }
        None => debug!(label = %key.text, "Unknown field label"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rows::Cell;

    #[test]
    fn inserts_resolved_label() {
        let labels = LabelTable::new();
        let mut map = BTreeMap::new();
        let row = Row::new(vec![
            Cell::header("Grading"),
            Cell::content("Report 60%\nAttendance 40%"),
        ]);
        extract(&row, &labels, &mut map);
        assert_eq!(map[&FieldId::Grading], "Report 60%\nAttendance 40%");
    }

    #[test]
    fn later_row_overwrites_same_field() {
        let labels = LabelTable::new();
        let mut map = BTreeMap::new();
        extract(&Row::new(vec![Cell::header("テキスト"), Cell::content("A")]), &labels, &mut map);
        extract(&Row::new(vec![Cell::header("Textbook"), Cell::content("B")]), &labels, &mut map);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&FieldId::Textbook], "B");
    }

    #[test]
    fn wrong_shapes_skipped() {
        let labels = LabelTable::new();
        let mut map = BTreeMap::new();
        extract(&Row::new(vec![Cell::header("Notice")]), &labels, &mut map);
        extract(
            &Row::new(vec![Cell::header("Notice"), Cell::content("a"), Cell::content("b")]),
            &labels,
            &mut map,
        );
        extract(&Row::new(vec![Cell::header("???"), Cell::content("a")]), &labels, &mut map);
        assert!(map.is_empty());
    }
}
