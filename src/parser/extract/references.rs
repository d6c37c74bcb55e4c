use crate::parser::rows::Row;

/// The whole row is one rich-text blob. Empty text leaves the field alone.
pub fn extract(row: &Row, into: &mut Option<String>) {
    match row.rich.as_deref() {
        Some(text) if !text.is_empty() => *into = Some(text.to_string()),
        _ => {}
    }
}
