use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::errors::ReportError;

pub const PROFITABLE_CATEGORIES_FILE: &str = "profitable_categories.json";
pub const SPENDING_BY_CATEGORY_FILE: &str = "spending_by_category.json";
pub const SPENDING_BY_WEEKDAY_FILE: &str = "spending_by_weekday.json";
pub const SPENDING_BY_WORKDAY_FILE: &str = "spending_by_workday.json";

const JSON_INDENT: &[u8] = b"    ";

/// Renders a payload as 4-space-indented JSON, non-ASCII left unescaped.
pub fn render_json<T: Serialize>(payload: &T) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    payload.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Destination directory for the per-report JSON audit files.
///
/// Each report overwrites its own fixed-name file wholesale on every
/// successful computation. A failed write is logged and swallowed: the side
/// channel must never change what a report returns.
#[derive(Debug, Clone)]
pub struct ReportSink {
    dir: PathBuf,
}

impl ReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn persist<T: Serialize>(&self, file_name: &str, payload: &T) {
        if let Err(err) = self.write(file_name, payload) {
            tracing::warn!(file = file_name, %err, "failed to persist report file");
        } else {
            tracing::info!(file = file_name, "report file written");
        }
    }

    fn write<T: Serialize>(&self, file_name: &str, payload: &T) -> Result<(), ReportError> {
        let rendered = render_json(payload)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(file_name), rendered)?;
        Ok(())
    }
}

impl Default for ReportSink {
    fn default() -> Self {
        Self::new(Path::new("data"))
    }
}
