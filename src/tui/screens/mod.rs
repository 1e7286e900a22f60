//! TUI screen implementations.

pub mod form;
pub mod help;
pub mod home;

pub use form::{FormScreenState, draw_form_screen};
pub use help::{HelpState, draw_help};
pub use home::{HomeState, draw_home};
