use tracing::debug;

use crate::parser::rows::Row;

/// One URL per line of the row's rich-view region; blank lines are dropped.
pub fn extract(row: &Row, into: &mut Option<Vec<String>>) {
    let Some(text) = row.rich.as_deref() else {
        debug!("URL row without rich-view region");
        return;
    };

    let urls = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    *into = Some(urls);
}
