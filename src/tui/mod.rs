//! TUI: App state, event loop, navigation, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod handler;
pub mod navigation;
pub mod prompt;
pub mod screens;
pub mod widgets;

pub use app::App;
pub use error::AppError;
