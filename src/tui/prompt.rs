//! Blocking yes/no prompt drawn on the terminal's last row.

use std::io::{self, Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use tracing::warn;

use crate::form::{ConfirmLeave, UnsavedChangesGuard};

/// Asks on the bottom row and waits for `y` or any other key.
///
/// Overwrites part of the frame; the app redraws fully afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl ConfirmLeave for TerminalPrompt {
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn confirm(&mut self, message: &str) -> bool {
        ask(message).unwrap_or_else(|e| {
            warn!(error = %e, "confirmation prompt failed; staying on screen");
            false
        })
    }
}

/// A guard that asks through [`TerminalPrompt`].
pub fn default_guard() -> UnsavedChangesGuard {
    UnsavedChangesGuard::new(TerminalPrompt)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn ask(message: &str) -> io::Result<bool> {
    let (_, rows) = terminal::size()?;
    let mut out = stdout();
    queue!(
        out,
        MoveTo(0, rows.saturating_sub(1)),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::Yellow),
        Print(format!("{message} [y/N] ")),
        ResetColor
    )?;
    out.flush()?;
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(matches!(key.code, KeyCode::Char('y' | 'Y')));
        }
    }
}
