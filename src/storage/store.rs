use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::error::StorageError;
use crate::model::{Account, Interview, Project, Question};

/// First line of each project file: everything except interviews and questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProjectMetadata {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProjectMetadata {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
        }
    }

    fn into_project(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            interviews: Vec::new(),
            questions: Vec::new(),
        }
    }
}

/// Lines 2+ of a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record {
    Interview(Interview),
    Question(Question),
}

/// Manages JSONL-based project persistence.
///
/// Each project is stored as `projects/{id}.jsonl`: line 1 is
/// [`ProjectMetadata`], lines 2+ are tagged interview and question records,
/// so adding a record is a single-line append.
#[derive(Debug, Clone)]
pub struct Store {
    base_path: PathBuf,
}

impl Store {
    /// Opens a store rooted at `data_dir`, creating `data_dir/projects/` if needed.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = data_dir.into();
        fs::create_dir_all(base_path.join("projects")).await?;
        debug!(path = %base_path.display(), "opened store");
        Ok(Self { base_path })
    }

    /// Returns the file path for a project ID.
    ///
    /// Replaces `/` with `_` to prevent path traversal.
    fn project_path(&self, id: &str) -> PathBuf {
        let safe_id = id.replace('/', "_");
        self.base_path.join("projects").join(format!("{safe_id}.jsonl"))
    }

    fn account_path(&self) -> PathBuf {
        self.base_path.join("account.json")
    }

    /// Writes a complete project to disk, overwriting any existing file.
    pub async fn save_project(&self, project: &Project) -> Result<(), StorageError> {
        fs::write(self.project_path(&project.id), encode_project(project)?).await?;
        Ok(())
    }

    /// Creates a new project, rejecting names already in use.
    ///
    /// Names are compared case-insensitively after trimming. Never
    /// overwrites an existing file: distinct names can share a slug and
    /// creation second, and so an ID.
    pub async fn create_project(&self, project: &Project) -> Result<(), StorageError> {
        let wanted = project.name.trim().to_lowercase();
        for existing in self.list_projects().await? {
            if existing.name.trim().to_lowercase() == wanted {
                return Err(StorageError::DuplicateProject {
                    name: project.name.clone(),
                });
            }
        }
        let buf = encode_project(project)?;
        let path = self.project_path(&project.id);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::ProjectIdTaken {
                    id: project.id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&buf).await?;
        file.flush().await?;
        info!(project = %project.id, "created project");
        Ok(())
    }

    /// Appends an interview to an existing project file.
    pub async fn append_interview(
        &self,
        project_id: &str,
        interview: &Interview,
    ) -> Result<(), StorageError> {
        self.append_record(project_id, &Record::Interview(interview.clone()))
            .await
    }

    /// Appends a question to an existing project file.
    pub async fn append_question(
        &self,
        project_id: &str,
        question: &Question,
    ) -> Result<(), StorageError> {
        self.append_record(project_id, &Record::Question(question.clone()))
            .await
    }

    /// Returns `StorageError::Io` if the project file does not exist.
    async fn append_record(&self, project_id: &str, record: &Record) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        append_line(&mut buf, record)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.project_path(project_id))
            .await?;
        file.write_all(&buf).await?;
        file.flush().await?;
        debug!(project = project_id, "appended record");
        Ok(())
    }

    pub async fn load_project(&self, id: &str) -> Result<Project, StorageError> {
        load_project_from_path(&self.project_path(id)).await
    }

    /// Lists all projects sorted by `created_at` descending (newest first).
    pub async fn list_projects(&self) -> Result<Vec<Project>, StorageError> {
        let mut entries = fs::read_dir(self.base_path.join("projects")).await?;
        let mut projects = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "jsonl") {
                projects.push(load_project_from_path(&path).await?);
            }
        }
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), StorageError> {
        fs::remove_file(self.project_path(id)).await?;
        info!(project = id, "deleted project");
        Ok(())
    }

    /// Overwrites the stored operator profile.
    pub async fn save_account(&self, account: &Account) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(account)?;
        fs::write(self.account_path(), json).await?;
        Ok(())
    }

    /// Returns the stored operator profile, or `None` if none was saved.
    pub async fn load_account(&self) -> Result<Option<Account>, StorageError> {
        match fs::read(self.account_path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Metadata line followed by one line per record.
fn encode_project(project: &Project) -> Result<Vec<u8>, StorageError> {
    let mut buf = serde_json::to_vec(&ProjectMetadata::from_project(project))?;
    buf.push(b'\n');
    for interview in &project.interviews {
        append_line(&mut buf, &Record::Interview(interview.clone()))?;
    }
    for question in &project.questions {
        append_line(&mut buf, &Record::Question(question.clone()))?;
    }
    Ok(buf)
}

fn append_line(buf: &mut Vec<u8>, record: &Record) -> Result<(), StorageError> {
    serde_json::to_writer(&mut *buf, record)?;
    buf.push(b'\n');
    Ok(())
}

async fn load_project_from_path(path: &Path) -> Result<Project, StorageError> {
    let content = fs::read_to_string(path).await?;
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| StorageError::EmptyProjectFile(path.to_path_buf()))?;
    let mut project = serde_json::from_str::<ProjectMetadata>(header)?.into_project();
    for line in lines {
        match serde_json::from_str::<Record>(line)? {
            Record::Interview(i) => project.add_interview(i),
            Record::Question(q) => project.add_question(q),
        }
    }
    Ok(project)
}
