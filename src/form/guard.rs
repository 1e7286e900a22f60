//! Unsaved-changes guard for navigation away from an edited form.

use std::fmt;

use tracing::debug;

/// Prompt shown when leaving a form with unsaved edits.
pub const LEAVE_PROMPT: &str = "You have unsaved changes. Leave anyway?";

/// Whether a navigation attempt may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    /// The user chose to stay. Expected control flow, not a failure.
    Block,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Asks the user whether to discard unsaved changes.
///
/// Called synchronously; navigation waits for the answer.
pub trait ConfirmLeave {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ConfirmLeave for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Intercepts navigation while a form has unsaved changes.
///
/// The guard is attached only while the unsaved flag is `true`; a detached
/// guard allows every navigation without prompting.
pub struct UnsavedChangesGuard {
    confirm: Box<dyn ConfirmLeave>,
    attached: bool,
}

impl fmt::Debug for UnsavedChangesGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsavedChangesGuard")
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl UnsavedChangesGuard {
    /// Creates a detached guard using `confirm` to decide.
    pub fn new(confirm: impl ConfirmLeave + 'static) -> Self {
        Self {
            confirm: Box::new(confirm),
            attached: false,
        }
    }

    /// Attaches while `has_unsaved_changes` is `true`, detaches otherwise.
    pub fn sync(&mut self, has_unsaved_changes: bool) {
        if self.attached != has_unsaved_changes {
            debug!(attached = has_unsaved_changes, "unsaved-changes guard");
        }
        self.attached = has_unsaved_changes;
    }

    /// Stops intercepting, e.g. when the owning screen is torn down.
    pub fn detach(&mut self) {
        self.sync(false);
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Decides a navigation attempt. Prompts only while attached.
    pub fn intercept(&mut self) -> NavigationDecision {
        if !self.attached {
            return NavigationDecision::Allow;
        }
        if self.confirm.confirm(LEAVE_PROMPT) {
            NavigationDecision::Allow
        } else {
            debug!("navigation blocked by unsaved changes");
            NavigationDecision::Block
        }
    }
}
