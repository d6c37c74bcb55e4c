use std::collections::BTreeMap;

use tracing::debug;

use crate::labels::{FieldId, LabelTable};
use crate::parser::rows::{Cell, Row};

/// Basic info rows hold one or two `header | content` pairs.
pub fn extract(row: &Row, labels: &LabelTable, into: &mut BTreeMap<FieldId, String>) {
    let pairs = match row.cells.as_slice() {
        [k, v] => vec![(k, v)],
        [k1, v1, k2, v2] => vec![(k1, v1), (k2, v2)],
        _ => {
            debug!(cells = row.len(), "Skipping basic info row with unexpected shape");
            return;
        }
    };
    if !pairs.iter().all(|(k, v)| k.is_header() && !v.is_header()) {
        debug!("Skipping basic info row without header/content alternation");
        return;
    }

    for (key, value) in pairs {
        insert_pair(key, value, labels, into);
    }
}

fn insert_pair(key: &Cell, value: &Cell, labels: &LabelTable, into: &mut BTreeMap<FieldId, String>) {
    match labels.resolve(&key.text) {
        Some(id) => {
            into.insert(id, value.rich_text().to_string());
        }
        None => debug!(label = %key.text, "Unknown basic info label"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_pairs() {
        let labels = LabelTable::new();
        let row = Row::new(vec![
            Cell::header("授業コード"),
            Cell::content("CS501"),
            Cell::header("授業名"),
            Cell::content("Systems Design"),
        ]);
        let mut info = BTreeMap::new();
        extract(&row, &labels, &mut info);
        assert_eq!(
            info,
            BTreeMap::from([
                (FieldId::ClassCode, "CS501".to_string()),
                (FieldId::ClassName, "Systems Design".to_string()),
            ])
        );
    }

    #[test]
    fn single_pair_english() {
        let labels = LabelTable::new();
        let row = Row::new(vec![Cell::header("Number of Credits"), Cell::content("1")]);
        let mut info = BTreeMap::new();
        extract(&row, &labels, &mut info);
        assert_eq!(info.get(&FieldId::NumberOfCredits).map(String::as_str), Some("1"));
    }

    #[test]
    fn unknown_label_ignored_known_kept() {
        let labels = LabelTable::new();
        let row = Row::new(vec![
            Cell::header("Mystery"),
            Cell::content("x"),
            Cell::header("Style"),
            Cell::content("Lecture"),
        ]);
        let mut info = BTreeMap::new();
        extract(&row, &labels, &mut info);
        assert_eq!(info.len(), 1);
        assert_eq!(info[&FieldId::Style], "Lecture");
    }

    #[test]
    fn missing_rich_view_yields_empty_text() {
        let labels = LabelTable::new();
        let row = Row::new(vec![Cell::header("Semester"), Cell::plain("2025 Spring")]);
        let mut info = BTreeMap::new();
        extract(&row, &labels, &mut info);
        assert_eq!(info[&FieldId::Semester], "");
    }

    #[test]
    fn malformed_rows_write_nothing() {
        let labels = LabelTable::new();
        let mut info = BTreeMap::new();
        for row in [
            Row::new(vec![Cell::header("Class code")]),
            Row::new(vec![Cell::header("Class code"), Cell::content("A"), Cell::header("Style")]),
            Row::new(vec![Cell::content("A"), Cell::header("Class code")]),
        ] {
            extract(&row, &labels, &mut info);
        }
        assert!(info.is_empty());
    }
}
