//! Submit control bound to a [`FormController`].

use super::lifecycle::{FormController, SubmitAttempt};
use super::status::SubmissionStatus;

/// Labels shown by a submit control for each submission status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    idle: String,
    pending: String,
    success: String,
    error: String,
}

impl SubmitControl {
    /// Creates a control labelled `idle` with stock labels for other states.
    pub fn new(idle: impl Into<String>) -> Self {
        Self {
            idle: idle.into(),
            pending: "Saving…".to_string(),
            success: "Saved".to_string(),
            error: "Failed".to_string(),
        }
    }

    pub fn pending_label(mut self, label: impl Into<String>) -> Self {
        self.pending = label.into();
        self
    }

    pub fn success_label(mut self, label: impl Into<String>) -> Self {
        self.success = label.into();
        self
    }

    pub fn error_label(mut self, label: impl Into<String>) -> Self {
        self.error = label.into();
        self
    }

    /// Only an idle form may be submitted through the control.
    pub fn is_enabled(&self, status: SubmissionStatus) -> bool {
        status.is_interactive()
    }

    pub fn label(&self, status: SubmissionStatus) -> &str {
        match status {
            SubmissionStatus::Default => &self.idle,
            SubmissionStatus::Pending => &self.pending,
            SubmissionStatus::Success => &self.success,
            SubmissionStatus::Error => &self.error,
        }
    }

    /// Starts a submission if enabled. Pressing a disabled control is a
    /// no-op and returns `None`.
    pub fn press(&self, form: &mut FormController) -> Option<SubmitAttempt> {
        if !self.is_enabled(form.status()) {
            return None;
        }
        Some(form.begin_submit())
    }
}
