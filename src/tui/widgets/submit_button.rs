//! Submit button widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::{SubmissionStatus, SubmitControl};

/// Button colour for each status.
fn status_color(status: SubmissionStatus) -> Color {
    match status {
        SubmissionStatus::Default => Color::Cyan,
        SubmissionStatus::Pending => Color::Yellow,
        SubmissionStatus::Success => Color::Green,
        SubmissionStatus::Error => Color::Red,
    }
}

/// Renders `control` for the given status. A disabled control is dimmed.
#[mutants::skip]
pub fn draw_submit_button(
    control: &SubmitControl,
    status: SubmissionStatus,
    frame: &mut Frame,
    area: Rect,
) {
    let color = status_color(status);
    let mut style = Style::default().fg(color);
    if !control.is_enabled(status) {
        style = style.add_modifier(Modifier::DIM);
    }
    let label = match status {
        SubmissionStatus::Pending => format!("⧗ {}", control.label(status)),
        _ => control.label(status).to_string(),
    };
    let button = Paragraph::new(Line::from(Span::styled(label, style.add_modifier(Modifier::BOLD))))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style),
        );
    frame.render_widget(button, area);
}
