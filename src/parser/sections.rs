use crate::labels::{FieldId, LabelTable};

use super::rows::Row;

/// Glyph the portal prepends to every section title.
const SECTION_BULLET: char = '■';
/// Zero-width characters that survive NFKC and sometimes lead a title.
const ZERO_WIDTH: [char; 2] = ['\u{200B}', '\u{FEFF}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    BasicInfo,
    RegistrationCategory,
    Overview,
    TextbookReference,
    OtherInformation,
    Url,
    References,
    Schedule,
}

impl SectionType {
    pub fn from_field(id: FieldId) -> Option<Self> {
        match id {
            FieldId::BasicCourseInformation => Some(Self::BasicInfo),
            FieldId::RegistrationCategory => Some(Self::RegistrationCategory),
            FieldId::Overview => Some(Self::Overview),
            FieldId::TextbookReference => Some(Self::TextbookReference),
            FieldId::OtherInformation => Some(Self::OtherInformation),
            FieldId::Url => Some(Self::Url),
            FieldId::References => Some(Self::References),
            FieldId::Schedule => Some(Self::Schedule),
            _ => None,
        }
    }
}

/// Decide whether `row` opens a new section.
///
/// A boundary row has exactly one header cell, styled full width, whose text
/// (minus the bullet glyph) is a section label. Anything else is data.
pub fn classify(row: &Row, labels: &LabelTable) -> Option<SectionType> {
    let mut headers = row.headers();
    let header = headers.next()?;
    if headers.next().is_some() || !header.full_width {
        return None;
    }

    let title = strip_bullet(&header.text);
    labels.resolve(title).and_then(SectionType::from_field)
}

fn strip_bullet(text: &str) -> &str {
    let text = text.trim().trim_start_matches(ZERO_WIDTH);
    text.strip_prefix(SECTION_BULLET)
        .unwrap_or(text)
        .trim_start_matches(|c: char| c.is_whitespace() || ZERO_WIDTH.contains(&c))
}
