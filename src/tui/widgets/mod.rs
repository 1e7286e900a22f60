//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;
pub mod submit_button;

pub use form::{FieldFocus, GridLayout, draw_form};
pub use status_bar::{StatusBarContext, draw_status_bar};
pub use submit_button::draw_submit_button;
