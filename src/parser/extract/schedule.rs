use tracing::debug;

use crate::parser::rows::Row;
use crate::record::ScheduleEntry;

const SCHEDULE_CELLS: usize = 5;

/// `number | datetime⏎room | lecturer | theme | content`.
///
/// Slots with nothing but a number (and the column-title row, whose cells
/// carry no rich text) are not entries.
pub fn extract(row: &Row, into: &mut Vec<ScheduleEntry>) {
    if row.len() != SCHEDULE_CELLS {
        debug!(cells = row.len(), "Skipping schedule row with unexpected shape");
        return;
    }
    let cells = &row.cells;

    let (datetime, room) = match cells[1].rich_text().split_once('\n') {
        Some((datetime, room)) => (datetime, room),
        None => (cells[1].rich_text(), ""),
    };

    let entry = ScheduleEntry {
        number: cells[0].text.clone(),
        datetime: datetime.trim().to_string(),
        room: room.trim().to_string(),
        lecturer: cells[2].rich_text().to_string(),
        theme: cells[3].rich_text().to_string(),
        content: cells[4].rich_text().to_string(),
    };

    if entry.has_content() {
        into.push(entry);
    } else {
        debug!(number = %entry.number, "Dropping empty schedule slot");
    }
}
