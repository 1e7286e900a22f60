//! Store-backed submit handler for every [`FormKind`].

use std::future::Future;
use std::path::PathBuf;

use tracing::info;

use crate::form::{Checkbox, FormValues, SubmitError, SubmitHandler};
use crate::model::{Account, Interview, ModelError, Project, Question};
use crate::storage::{ExportFormat, ExportOptions, Store, StorageError, export_project};

use super::navigation::FormKind;

/// Why a store-backed submission failed.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The submitted values could not be turned into a domain record.
    #[error("{0}")]
    Model(#[from] ModelError),

    /// The record could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No project selected")]
    NoProject,
}

impl From<HandlerError> for SubmitError {
    fn from(err: HandlerError) -> Self {
        match err {
            err @ HandlerError::NoProject => SubmitError::Rejected(err.to_string()),
            other => SubmitError::failed(other),
        }
    }
}

/// Persists a submitted form through the [`Store`].
#[derive(Debug, Clone, Copy)]
pub struct StoreHandler<'a> {
    store: &'a Store,
    kind: FormKind,
}

impl<'a> StoreHandler<'a> {
    pub fn new(store: &'a Store, kind: FormKind) -> Self {
        Self { store, kind }
    }

    async fn run(&self, values: FormValues) -> Result<(), HandlerError> {
        match self.kind {
            FormKind::Register => {
                let account = Account::from_values(&values)?;
                self.store.save_account(&account).await?;
            }
            FormKind::NewProject => {
                let project = Project::from_values(&values)?;
                self.store.create_project(&project).await?;
            }
            FormKind::NewInterview => {
                let interview = Interview::from_values(&values)?;
                self.store
                    .append_interview(project_id(&values)?, &interview)
                    .await?;
            }
            FormKind::NewQuestion => {
                let question = Question::from_values(&values)?;
                self.store
                    .append_question(project_id(&values)?, &question)
                    .await?;
            }
            FormKind::Export => {
                let format: ExportFormat = values.get("format").parse()?;
                let project = self.store.load_project(project_id(&values)?).await?;
                let options = ExportOptions {
                    format,
                    include_questions: Checkbox::is_checked(values.get("include_questions")),
                };
                let path = PathBuf::from(values.get("path").trim());
                export_project(&project, &path, options).await?;
            }
        }
        info!(form = self.kind.title(), "form submitted");
        Ok(())
    }
}

impl SubmitHandler for StoreHandler<'_> {
    fn submit(&self, values: FormValues) -> impl Future<Output = Result<(), SubmitError>> {
        async move { self.run(values).await.map_err(SubmitError::from) }
    }
}

fn project_id(values: &FormValues) -> Result<&str, HandlerError> {
    values.non_empty("project_id").ok_or(HandlerError::NoProject)
}
