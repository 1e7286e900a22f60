//! Form layer: schemas, validation, submission lifecycle and navigation guard.
//!
//! Nothing here draws; the TUI renders a [`FormController`] through
//! [`crate::tui::widgets::draw_form`].

pub mod component;
mod error;
mod guard;
mod lifecycle;
mod schema;
mod status;
mod submit;
mod validation;
mod values;

pub use component::Checkbox;
pub use error::{SchemaError, SubmitError};
pub use guard::{ConfirmLeave, LEAVE_PROMPT, NavigationDecision, UnsavedChangesGuard};
pub use lifecycle::{ChangeListener, FormController, SubmitAttempt, SubmitHandler};
pub use schema::{
    FieldDescriptor, FieldKind, FieldRule, FieldWidget, FormSchema, FormSchemaBuilder,
    GRID_COLUMNS, InputType, Rule, SelectOption,
};
pub use status::SubmissionStatus;
pub use submit::SubmitControl;
pub use validation::{ErrorCode, UNDEFINED_MESSAGE, ValidationReport, message_for, validate};
pub use values::FormValues;
