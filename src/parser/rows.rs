use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Node, Selector};

static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[id="pkx02301:ch:table"]"#).unwrap());
static ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.rowStyle.rowMargin").unwrap());
static CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ui-widget-header, div.ui-widget-content").unwrap());
static RICH_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.fr-box.fr-view").unwrap());

// A run of raw newlines inside a text node, with any indentation around them.
static LINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)*").unwrap());

const HEADER_CLASS: &str = "ui-widget-header";
const FULL_WIDTH: &str = "width:100%";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    /// Trimmed plain text of the whole cell.
    pub text: String,
    /// Extracted rich-view text, `None` when the cell has no rich-view region.
    pub rich: Option<String>,
    pub full_width: bool,
}

impl Cell {
    pub fn is_header(&self) -> bool {
        self.kind == CellKind::Header
    }

    /// Rich text, empty when the rich-view region is missing.
    pub fn rich_text(&self) -> &str {
        self.rich.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Rich text of the first rich-view region anywhere in the row.
    pub rich: Option<String>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn headers(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_header())
    }
}

/// Extract the syllabus rows of one page, in document order.
///
/// Rows are searched inside the syllabus table when present, otherwise in the
/// whole document.
pub fn extract_rows(html: &str) -> Vec<Row> {
    let doc = Html::parse_document(html);
    let scope = doc
        .select(&TABLE_SEL)
        .next()
        .unwrap_or_else(|| doc.root_element());
    scope.select(&ROW_SEL).map(row_from_element).collect()
}

fn row_from_element(row: ElementRef) -> Row {
    let cells = row.select(&CELL_SEL).map(cell_from_element).collect();
    Row {
        cells,
        rich: row.select(&RICH_SEL).next().map(rich_text),
    }
}

fn cell_from_element(cell: ElementRef) -> Cell {
    let el = cell.value();
    let kind = if el.classes().any(|c| c == HEADER_CLASS) {
        CellKind::Header
    } else {
        CellKind::Content
    };
    let full_width = el
        .attr("style")
        .map(|style| {
            let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
            compact.contains(FULL_WIDTH)
        })
        .unwrap_or(false);

    Cell {
        kind,
        text: cell.text().collect::<String>().trim().to_string(),
        rich: cell.select(&RICH_SEL).next().map(rich_text),
        full_width,
    }
}

/// Flatten a rich-view region to text. `<br>` becomes `\n`; each text node is
/// cleaned of template whitespace and trimmed, whitespace-only nodes vanish.
pub fn rich_text(region: ElementRef) -> String {
    let mut out = String::new();
    for node in region.descendants() {
        match node.value() {
            Node::Text(text) => {
                let cleaned = LINE_RUN_RE.replace_all(text, |caps: &Captures| {
                    fold_line_run(&caps[0]).to_string()
                });
                out.push_str(cleaned.trim());
            }
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Raw newlines in markup are not line breaks except as blank lines.
///
/// A blank line is a paragraph break and keeps one `\n`. A newline followed by
/// indentation is template wrapping and vanishes. A bare newline is a space.
fn fold_line_run(run: &str) -> &'static str {
    if run.matches('\n').count() > 1 {
        "\n"
    } else if run.len() > 1 {
        ""
    } else {
        " "
    }
}

#[cfg(test)]
impl Cell {
    pub fn header(text: &str) -> Self {
        Cell {
            kind: CellKind::Header,
            text: text.to_string(),
            rich: None,
            full_width: false,
        }
    }

    pub fn section_header(text: &str) -> Self {
        Cell {
            full_width: true,
            ..Cell::header(text)
        }
    }

    pub fn content(rich: &str) -> Self {
        Cell {
            kind: CellKind::Content,
            text: rich.replace('\n', ""),
            rich: Some(rich.to_string()),
            full_width: false,
        }
    }

    /// Content cell without a rich-view region.
    pub fn plain(text: &str) -> Self {
        Cell {
            kind: CellKind::Content,
            text: text.to_string(),
            rich: None,
            full_width: false,
        }
    }
}

#[cfg(test)]
impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells, rich: None }
    }

    pub fn rich(text: &str) -> Self {
        Row {
            cells: vec![Cell::content(text)],
            rich: Some(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_rich(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        let region = doc.select(&RICH_SEL).next().unwrap();
        rich_text(region)
    }

    #[test]
    fn br_becomes_newline() {
        let html = r#"<div class="fr-box fr-view">4/10(Mon) [2]<br>L1 Lecture Room</div>"#;
        assert_eq!(first_rich(html), "4/10(Mon) [2]\nL1 Lecture Room");
    }

    #[test]
    fn template_indentation_removed() {
        let html = "<div class=\"fr-box fr-view\">\n                Systems\n                Design\n            </div>";
        assert_eq!(first_rich(html), "SystemsDesign");
    }

    #[test]
    fn blank_line_before_indent_is_paragraph_break() {
        let html = "<div class=\"fr-box fr-view\">Report 60%\n\n                Attendance 40%</div>";
        assert_eq!(first_rich(html), "Report 60%\nAttendance 40%");
    }

    #[test]
    fn bare_newline_is_a_space() {
        let html = "<div class=\"fr-box fr-view\">4/10(Mon)\n[2]</div>";
        assert_eq!(first_rich(html), "4/10(Mon) [2]");
    }

    #[test]
    fn whitespace_nodes_dropped_around_br() {
        let html = "<div class=\"fr-box fr-view\"><p>first</p>\n   <br>\n   <p>second</p></div>";
        assert_eq!(first_rich(html), "first\nsecond");
    }

    #[test]
    fn cell_kinds_and_width() {
        let html = r#"<div class="rowStyle rowMargin">
            <div class="ui-widget-header" style="width: 100%;">■ 授業情報</div>
        </div>
        <div class="rowStyle rowMargin">
            <div class="ui-widget-header" style="width:20%">授業コード</div>
            <div class="ui-widget-content"><div class="fr-box fr-view">CS501</div></div>
            <div class="ui-widget-content">no rich view</div>
        </div>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 2);

        let boundary = &rows[0].cells[0];
        assert!(boundary.is_header());
        assert!(boundary.full_width);
        assert_eq!(boundary.text, "■ 授業情報");

        let data = &rows[1];
        assert_eq!(data.len(), 3);
        assert!(!data.cells[0].full_width);
        assert_eq!(data.cells[1].kind, CellKind::Content);
        assert_eq!(data.cells[1].rich_text(), "CS501");
        assert_eq!(data.cells[2].rich, None);
        assert_eq!(data.cells[2].rich_text(), "");
        assert_eq!(data.rich.as_deref(), Some("CS501"));
    }

    #[test]
    fn rows_scoped_to_syllabus_table() {
        let html = r#"<div class="rowStyle rowMargin"><div class="ui-widget-header">outside</div></div>
        <div id="pkx02301:ch:table">
            <div class="rowStyle rowMargin"><div class="ui-widget-header">inside</div></div>
        </div>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0].text, "inside");
    }

    #[test]
    fn no_rows_in_unrelated_markup() {
        assert!(extract_rows("<html><body><p>maintenance</p></body></html>").is_empty());
    }
}
