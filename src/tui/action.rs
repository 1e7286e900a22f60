//! Actions returned by screen event handlers.

use crate::form::FormValues;

use super::navigation::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens. Navigation goes through the
/// [`Navigator`](super::navigation::Navigator) and its guard.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// The current form is pending; run its handler with these values.
    Submit(FormValues),
    /// Delete the project with the given ID from storage.
    DeleteProject(String),
    /// Open the keybinding overlay for the current screen.
    ShowHelp,
    /// Close the keybinding overlay.
    CloseHelp,
    /// Quit the application.
    Quit,
}
