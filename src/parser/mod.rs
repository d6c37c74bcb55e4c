pub mod extract;
pub mod rows;
pub mod sections;

use anyhow::Result;

use crate::labels::LabelTable;
use crate::normalize;
use crate::record::ParseOutcome;
use extract::SyllabusParser;

/// Three-step pipeline: raw response → normalized HTML → rows → record.
pub fn process_page(raw: &str, labels: &LabelTable) -> Result<ParseOutcome> {
    let html = normalize::unwrap_partial_response(raw)?;
    let rows = rows::extract_rows(&normalize::normalize(&html));
    Ok(SyllabusParser::new(labels).parse(&rows))
}
