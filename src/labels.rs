use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Portal display language. Each label has one variant per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Lang {
    Ja,
    En,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
        }
    }

    fn index(self) -> usize {
        match self {
            Lang::Ja => 0,
            Lang::En => 1,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Declares every canonical field id together with its `[ja, en]` labels.
/// The serde name of each variant is the canonical id string.
macro_rules! field_ids {
    ($($variant:ident => $id:literal, [$ja:literal, $en:literal];)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum FieldId {
            $(#[serde(rename = $id)] $variant,)*
        }

        impl FieldId {
            pub const ALL: &'static [FieldId] = &[$(FieldId::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(FieldId::$variant => $id,)*
                }
            }

            /// The `[ja, en]` labels the portal renders for this field.
            pub fn labels(self) -> [&'static str; 2] {
                match self {
                    $(FieldId::$variant => [$ja, $en],)*
                }
            }
        }
    };
}

field_ids! {
    // Basic course information
    Semester => "semester", ["開講年度・学期", "Semester"];
    SubjectNumber => "subject_number", ["授業番号", "Subject number"];
    ClassCode => "class_code", ["授業コード", "Class code"];
    ClassName => "class_name", ["授業名", "Class name"];
    CourseType => "course_type", ["科目区分", "Course type"];
    TeacherTrainingCourse => "teacher_training_course", ["教職科目", "Teacher training course"];
    NumberOfCredits => "number_of_credits", ["単位数", "Number of Credits"];
    RequiredElectiveEtc => "required_elective_etc", ["選択・必修・自由", "Required・Elective etc."];
    Style => "style", ["授業形態", "Style"];
    MainLanguage => "main_language", ["主な使用言語", "Main Language"];
    Scheduling => "scheduling", ["開講時期", "Scheduling"];
    SubjectRegistration => "subject_registration", ["履修登録の要否", "Subject Registration"];

    // Registration category
    EducationPrograms => "education_programs", ["プログラム名", "Education Programs"];
    RegistrationClass => "registration_class", ["履修区分", "Registration Class"];
    CoreSubjects => "core_subjects", ["コア科目", "Core Subjects"];
    RegistrationRequirements => "registration_requirements", ["履修方法", "Registration requirements"];

    // Overview
    SupervisingLecturer => "supervising_lecturer", ["担当責任教員", "Supervising lecturer"];
    Lecturer => "lecturer", ["担当教員", "Lecturer"];
    LearningObjectiveGoals => "learning_objective_goals", ["教育目的 / 学修到達目標", "Learning Objectives / Goals"];
    OutlineTeachingMethod => "outline_teaching_method", ["授業概要 / 指導方針", "Course Outline / Teaching Method"];

    // Textbook / reference book
    Textbook => "textbook", ["テキスト", "Textbook"];
    ReferenceBook => "reference_book", ["参考書", "Reference book"];

    // Other information
    Prerequisites => "prerequisites", ["履修条件", "Prerequisites"];
    OfficeHour => "office_hour", ["オフィスアワー", "Office hour"];
    Grading => "grading", ["成績評価の方法と基準", "Grading"];
    RelatedSubjects => "related_subjects", ["関連科目", "Related subjects"];
    RelatedDegrees => "related_degrees", ["関連学位", "Related Degree"];
    Notice => "notice", ["注意事項", "Notice"];

    // Class information column headers (lecturer is shared with the overview)
    Number => "number", ["回数", "Number"];
    DatetimeRoom => "datetime_room", ["日時・場所", "Date [Time] / Room"];
    Theme => "theme", ["テーマ", "Theme"];
    Content => "content", ["内容", "Content"];

    // Section headers
    BasicCourseInformation => "basic_course_information", ["授業科目基本情報", "Basic course information"];
    RegistrationCategory => "registration_category", ["教育プログラム別の履修区分", "Registration Category"];
    Overview => "overview", ["授業科目概要", "Overview"];
    TextbookReference => "textbook_reference", ["テキスト・参考書", "Textbook/Reference book"];
    OtherInformation => "other_information", ["その他", "Other information"];
    Url => "url", ["授業関連URL", "Lecture related URL"];
    References => "references", ["その他参考資料等", "References"];
    Schedule => "schedule", ["授業情報", "Class information"];
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Reverse index from rendered label (either language) to canonical id.
///
/// Built once and handed to the parser; there is no global instance.
#[derive(Debug, Clone)]
pub struct LabelTable {
    by_label: HashMap<&'static str, FieldId>,
}

impl LabelTable {
    pub fn new() -> Self {
        let by_label = FieldId::ALL
            .iter()
            .flat_map(|&id| id.labels().into_iter().map(move |label| (label, id)))
            .collect();
        Self { by_label }
    }

    /// Canonical id for a rendered label. Unknown labels are not an error.
    pub fn resolve(&self, label: &str) -> Option<FieldId> {
        self.by_label.get(label.trim()).copied()
    }

    pub fn label(&self, id: FieldId, lang: Lang) -> &'static str {
        id.labels()[lang.index()]
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::new()
    }
}
