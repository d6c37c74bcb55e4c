use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::labels::FieldId;

/// Education programs, in the column order the portal renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    Is,
    Bs,
    Ms,
    Ds,
    Dgi,
}

impl Program {
    pub const ALL: [Program; 5] = [Program::Is, Program::Bs, Program::Ms, Program::Ds, Program::Dgi];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRegistration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_subjects: Option<String>,
}

/// Per-program registration data plus the free-text requirements.
/// Serialized flat: `{"is": {...}, "bs": {...}, "registration_requirements": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCategory {
    #[serde(flatten)]
    pub programs: BTreeMap<Program, ProgramRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_requirements: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub number: String,
    pub datetime: String,
    pub room: String,
    pub lecturer: String,
    pub theme: String,
    pub content: String,
}

impl ScheduleEntry {
    /// True when any field besides the sequence number carries text.
    pub fn has_content(&self) -> bool {
        [&self.datetime, &self.room, &self.lecturer, &self.theme, &self.content]
            .iter()
            .any(|s| !s.trim().is_empty())
    }
}

/// One course's syllabus, in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub basic_course_information: BTreeMap<FieldId, String>,
    pub registration_category: RegistrationCategory,
    pub overview: BTreeMap<FieldId, String>,
    pub textbook_reference: BTreeMap<FieldId, String>,
    pub other_information: BTreeMap<FieldId, String>,
    pub url: Option<Vec<String>>,
    pub references: Option<String>,
    pub schedule: Vec<ScheduleEntry>,
}

impl CourseRecord {
    pub fn class_code(&self) -> Option<&str> {
        self.basic_course_information
            .get(&FieldId::ClassCode)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn class_name(&self) -> Option<&str> {
        self.basic_course_information
            .get(&FieldId::ClassName)
            .map(|s| s.as_str())
    }

    /// Wrap under the class code when one was resolved.
    pub fn into_outcome(self) -> ParseOutcome {
        match self.class_code().map(str::to_string) {
            Some(class_code) => ParseOutcome::Keyed {
                class_code,
                record: self,
            },
            None => ParseOutcome::Unkeyed(self),
        }
    }
}

/// Result of parsing one page.
///
/// `Unkeyed` keeps a page without a class code distinguishable from a keyed
/// one; serialized it is the bare record, while `Keyed` serializes as a
/// single-entry `{class_code: record}` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Keyed { class_code: String, record: CourseRecord },
    Unkeyed(CourseRecord),
}

impl ParseOutcome {
    pub fn class_code(&self) -> Option<&str> {
        match self {
            ParseOutcome::Keyed { class_code, .. } => Some(class_code),
            ParseOutcome::Unkeyed(_) => None,
        }
    }

    pub fn record(&self) -> &CourseRecord {
        match self {
            ParseOutcome::Keyed { record, .. } | ParseOutcome::Unkeyed(record) => record,
        }
    }
}

impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParseOutcome::Keyed { class_code, record } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(class_code, record)?;
                map.end()
            }
            ParseOutcome::Unkeyed(record) => record.serialize(serializer),
        }
    }
}
