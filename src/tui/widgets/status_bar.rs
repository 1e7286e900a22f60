//! Status bar widget — persistent one-line context display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Display name of the saved operator profile, if any.
    pub operator: Option<String>,
    /// Name of the selected project, if any.
    pub project: Option<String>,
    /// Interviews recorded in the selected project.
    pub interviews: usize,
    /// Questions defined in the selected project.
    pub questions: usize,
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned, Cyan):
/// - With project:    `Ann  [Onboarding] 3 interviews · 5 questions`
/// - Without project: `Ann  no project selected`
/// - No profile:      `(no profile)  …`
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let gray = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span> = Vec::new();
    match &ctx.operator {
        Some(name) => spans.push(Span::styled(name.clone(), cyan)),
        None => spans.push(Span::styled("(no profile)", gray)),
    }
    spans.push(Span::raw("  "));

    match &ctx.project {
        Some(project) => {
            spans.push(Span::styled(format!("[{project}] "), cyan));
            spans.push(Span::styled(
                format!(
                    "{} interviews · {} questions",
                    ctx.interviews, ctx.questions
                ),
                cyan,
            ));
        }
        None => spans.push(Span::styled("no project selected", gray)),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
