use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::labels::Lang;
use crate::record::{CourseRecord, ParseOutcome};

pub const DEFAULT_OUT_DIR: &str = "data";

/// `<out_dir>/<year>-<lang>.json`
pub fn output_path(out_dir: &Path, year: i32, lang: Lang) -> PathBuf {
    out_dir.join(format!("{}-{}.json", year, lang))
}

/// All courses of one (year, language) run, keyed by class code.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: BTreeMap<String, CourseRecord>,
    unkeyed: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page's outcome. A later record for the same class code
    /// replaces the earlier one; unkeyed pages are counted and dropped.
    pub fn absorb(&mut self, outcome: ParseOutcome) -> bool {
        match outcome {
            ParseOutcome::Keyed { class_code, record } => {
                if self.courses.insert(class_code.clone(), record).is_some() {
                    debug!(%class_code, "Replaced existing course record");
                }
                true
            }
            ParseOutcome::Unkeyed(record) => {
                self.unkeyed += 1;
                debug!(
                    class_name = record.class_name().unwrap_or("-"),
                    "Page has no class code, not stored"
                );
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn unkeyed(&self) -> usize {
        self.unkeyed
    }

    /// Pretty JSON with 4-space indent; non-ASCII text is written verbatim.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        self.courses
            .serialize(&mut ser)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let courses = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self {
            courses,
            unkeyed: 0,
        })
    }
}

#[cfg(test)]
impl Catalog {
    pub fn get(&self, class_code: &str) -> Option<&CourseRecord> {
        self.courses.get(class_code)
    }
}
