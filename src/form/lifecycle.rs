//! Form lifecycle controller: owns values and the submission state machine.

use std::fmt;
use std::future::Future;

use tracing::{debug, info, warn};

use super::error::SubmitError;
use super::schema::FormSchema;
use super::status::SubmissionStatus;
use super::validation::{ValidationReport, validate};
use super::values::FormValues;

/// Called with the complete value set after every edit.
///
/// The listener may write derived fields; those writes do not re-notify.
pub type ChangeListener = Box<dyn FnMut(&mut FormValues) + Send>;

/// Performs the actual create/update work for a submitted form.
pub trait SubmitHandler {
    fn submit(&self, values: FormValues) -> impl Future<Output = Result<(), SubmitError>>;
}

impl<F, Fut> SubmitHandler for F
where
    F: Fn(FormValues) -> Fut,
    Fut: Future<Output = Result<(), SubmitError>>,
{
    fn submit(&self, values: FormValues) -> impl Future<Output = Result<(), SubmitError>> {
        self(values)
    }
}

/// Outcome of asking the controller to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Status is now [`SubmissionStatus::Pending`]; run the handler with these values.
    Started(FormValues),
    /// A submission is already in flight; nothing changed.
    Busy,
    /// Validation failed; see [`FormController::report`]. Status is unchanged.
    Invalid,
}

/// Tracks the values and submission status of one form.
pub struct FormController {
    schema: FormSchema,
    values: FormValues,
    initial: FormValues,
    baseline: FormValues,
    status: SubmissionStatus,
    report: ValidationReport,
    error: Option<SubmitError>,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("schema", &self.schema.name())
            .field("values", &self.values)
            .field("status", &self.status)
            .field("report", &self.report)
            .field("error", &self.error)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl FormController {
    /// Creates a controller with the schema's initial values.
    pub fn new(schema: FormSchema) -> Self {
        let values = FormValues::from_schema(&schema);
        Self::with_values(schema, values)
    }

    /// Creates a controller pre-filled with `values`, which become both the
    /// reset target and the unsaved-changes baseline.
    pub fn with_values(schema: FormSchema, values: FormValues) -> Self {
        Self {
            schema,
            initial: values.clone(),
            baseline: values.clone(),
            values,
            status: SubmissionStatus::Default,
            report: ValidationReport::default(),
            error: None,
            on_change: None,
        }
    }

    /// Installs a change listener.
    pub fn on_change(mut self, listener: impl FnMut(&mut FormValues) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Field errors from the last validation.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// The error that moved the form to [`SubmissionStatus::Error`].
    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    /// Returns `true` while fields must ignore input.
    pub fn is_locked(&self) -> bool {
        !self.status.is_interactive()
    }

    /// Returns `true` if values differ from the last saved baseline.
    pub fn has_unsaved_changes(&self) -> bool {
        self.values != self.baseline
    }

    /// Replaces the value of `name`. Ignored while locked.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(name, |slot| *slot = value)
    }

    /// Edits the value of `name` in place. Ignored while locked.
    ///
    /// Notifies the change listener on every accepted edit, even when the
    /// value ends up unchanged.
    pub fn edit(&mut self, name: &str, f: impl FnOnce(&mut String)) -> bool {
        if self.is_locked() {
            debug!(form = self.schema.name(), field = name, status = %self.status, "edit ignored");
            return false;
        }
        f(self.values.entry_mut(name));
        if let Some(listener) = self.on_change.as_mut() {
            listener(&mut self.values);
        }
        if !self.report.is_empty() {
            self.report = validate(&self.schema, &self.values);
        }
        true
    }

    /// Validates and, if nothing is in flight, moves to
    /// [`SubmissionStatus::Pending`].
    ///
    /// Allowed from every state but `Pending`, so a failed or completed
    /// submission can be retried directly.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if !self.status.can_begin() {
            debug!(form = self.schema.name(), "submit ignored: already pending");
            return SubmitAttempt::Busy;
        }
        self.report = validate(&self.schema, &self.values);
        if !self.report.is_empty() {
            debug!(
                form = self.schema.name(),
                errors = self.report.len(),
                "submit blocked by validation"
            );
            return SubmitAttempt::Invalid;
        }
        self.transition(SubmissionStatus::Pending);
        self.error = None;
        SubmitAttempt::Started(self.values.clone())
    }

    /// Records the handler's outcome. Ignored unless pending.
    pub fn settle(&mut self, result: Result<(), SubmitError>) -> bool {
        if !self.status.is_pending() {
            warn!(form = self.schema.name(), status = %self.status, "settle without pending submission");
            return false;
        }
        match result {
            Ok(()) => {
                self.baseline = self.values.clone();
                self.transition(SubmissionStatus::Success);
            }
            Err(e) => {
                warn!(form = self.schema.name(), error = %e, "submission failed");
                self.error = Some(e);
                self.transition(SubmissionStatus::Error);
            }
        }
        true
    }

    /// Runs a full submission: begin, await the handler, settle.
    pub async fn submit<H: SubmitHandler>(&mut self, handler: &H) -> SubmissionStatus {
        if let SubmitAttempt::Started(values) = self.begin_submit() {
            let result = handler.submit(values).await;
            self.settle(result);
        }
        self.status
    }

    /// Returns a settled form to [`SubmissionStatus::Default`] so editing
    /// can resume.
    pub fn acknowledge(&mut self) -> bool {
        match self.status {
            SubmissionStatus::Success | SubmissionStatus::Error => {
                self.error = None;
                self.transition(SubmissionStatus::Default);
                true
            }
            SubmissionStatus::Default | SubmissionStatus::Pending => false,
        }
    }

    /// Restores the values the controller was created with and returns to
    /// [`SubmissionStatus::Default`]. Ignored while pending.
    pub fn reset(&mut self) {
        if self.status.is_pending() {
            return;
        }
        self.values = self.initial.clone();
        self.baseline = self.initial.clone();
        self.report = ValidationReport::default();
        self.error = None;
        self.status = SubmissionStatus::Default;
    }

    fn transition(&mut self, to: SubmissionStatus) {
        info!(form = self.schema.name(), from = %self.status, to = %to, "submission status");
        self.status = to;
    }
}
