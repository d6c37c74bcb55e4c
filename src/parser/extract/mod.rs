pub mod basic;
pub mod common;
pub mod links;
pub mod references;
pub mod registration;
pub mod schedule;

use tracing::debug;

use super::rows::Row;
use super::sections::{classify, SectionType};
use crate::labels::LabelTable;
use crate::record::{CourseRecord, ParseOutcome};

/// Walks one page's rows, tracking the open section, and builds the record.
pub struct SyllabusParser<'a> {
    labels: &'a LabelTable,
}

impl<'a> SyllabusParser<'a> {
    pub fn new(labels: &'a LabelTable) -> Self {
        Self { labels }
    }

    pub fn parse(&self, rows: &[Row]) -> ParseOutcome {
        let mut record = CourseRecord::default();
        let mut current: Option<SectionType> = None;

        for row in rows {
            if let Some(section) = classify(row, self.labels) {
                debug!(?section, "Section opened");
                current = Some(section);
                continue;
            }

            match current {
                Some(section) => self.dispatch(section, row, &mut record),
                None => debug!(cells = row.len(), "Dropping row before first section"),
            }
        }

        record.into_outcome()
    }

    fn dispatch(&self, section: SectionType, row: &Row, record: &mut CourseRecord) {
        let labels = self.labels;
        match section {
            SectionType::BasicInfo => {
                basic::extract(row, labels, &mut record.basic_course_information)
            }
            SectionType::RegistrationCategory => {
                registration::extract(row, labels, &mut record.registration_category)
            }
            SectionType::Overview => common::extract(row, labels, &mut record.overview),
            SectionType::TextbookReference => {
                common::extract(row, labels, &mut record.textbook_reference)
            }
            SectionType::OtherInformation => {
                common::extract(row, labels, &mut record.other_information)
            }
            SectionType::Url => links::extract(row, &mut record.url),
            SectionType::References => references::extract(row, &mut record.references),
            SectionType::Schedule => schedule::extract(row, &mut record.schedule),
        }
    }
}

// ── Tests ──
