use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::json;
use tokio::fs;
use tracing::info;

use super::error::StorageError;
use crate::model::Project;

/// File format for exported project data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// One pretty-printed JSON document.
    #[default]
    Json,
    /// One JSON object per line, one line per record.
    JsonLines,
}

impl ExportFormat {
    pub const ALL: [Self; 2] = [Self::Json, Self::JsonLines];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonLines => "jsonl",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON document",
            Self::JsonLines => "JSON Lines",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| StorageError::UnknownFormat(s.to_string()))
    }
}

/// What to include in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_questions: bool,
}

/// Renders a project in the requested format.
pub fn render_export(project: &Project, options: ExportOptions) -> Result<String, StorageError> {
    match options.format {
        ExportFormat::Json => {
            let mut doc = serde_json::to_value(project)?;
            if !options.include_questions
                && let Some(obj) = doc.as_object_mut()
            {
                obj.remove("questions");
            }
            let mut out = serde_json::to_string_pretty(&doc)?;
            out.push('\n');
            Ok(out)
        }
        ExportFormat::JsonLines => {
            let mut out = String::new();
            for interview in &project.interviews {
                let line = json!({
                    "project_id": project.id,
                    "type": "interview",
                    "record": interview,
                });
                out.push_str(&serde_json::to_string(&line)?);
                out.push('\n');
            }
            if options.include_questions {
                for question in &project.questions {
                    let line = json!({
                        "project_id": project.id,
                        "type": "question",
                        "record": question,
                    });
                    out.push_str(&serde_json::to_string(&line)?);
                    out.push('\n');
                }
            }
            Ok(out)
        }
    }
}

/// Exports a project to `path`.
pub async fn export_project(
    project: &Project,
    path: &Path,
    options: ExportOptions,
) -> Result<(), StorageError> {
    let content = render_export(project, options)?;
    fs::write(path, content).await?;
    info!(project = %project.id, path = %path.display(), format = %options.format, "exported project");
    Ok(())
}

/// Returns the default export path for a project: `~/surveyform-{id}.{ext}`.
///
/// Returns `StorageError::NoHomeDir` if the home directory cannot be
/// determined.
pub fn default_export_path(project: &Project, format: ExportFormat) -> Result<PathBuf, StorageError> {
    let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
    Ok(home.join(export_file_name(project, format)))
}

fn export_file_name(project: &Project, format: ExportFormat) -> String {
    let safe_id = project.id.replace('/', "_");
    format!("surveyform-{safe_id}.{}", format.extension())
}
