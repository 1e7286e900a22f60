//! Help overlay — scrollable keybinding reference for the screen beneath it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::action::Action;
use crate::tui::navigation::Screen;

static HOME_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "navigate"),
    ("n", "new project"),
    ("i", "add interview to selected project"),
    ("a", "add question to selected project"),
    ("x", "export selected project"),
    ("p", "edit profile"),
    ("d", "delete project (y to confirm)"),
    ("q / Esc", "quit"),
    ("? / F1", "help"),
];

static FORM_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("←/→", "choose option"),
    ("Space", "toggle checkbox"),
    ("Enter", "submit"),
    ("Esc", "back (asks when there are unsaved changes)"),
    ("F1", "help"),
];

static OUTCOME_KEYS: &[(&str, &str)] = &[
    ("r", "retry a failed submission"),
    ("any key", "after a failure: edit again"),
    ("any key", "after success: add another or go back"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "close")];

/// State for the help overlay.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl HelpState {
    /// Creates a [`HelpState`] scrolled to the top, describing `origin`.
    pub fn new(origin: Screen) -> Self {
        Self { scroll: 0, origin }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen the overlay was opened over.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1) => Action::CloseHelp,
            _ => Action::None,
        }
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::Home => build_section("Projects", HOME_KEYS),
        Screen::Form(kind) => {
            let mut lines = build_section(kind.title(), FORM_KEYS);
            lines.extend(build_section("After submitting", OUTCOME_KEYS));
            lines
        }
    };
    lines.extend(build_section("Help", HELP_KEYS));
    lines
}

/// Renders the help overlay over `area`.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", state.origin().label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: close").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::tui::navigation::FormKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    const FORM: Screen = Screen::Form(FormKind::NewInterview);

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top() {
            let state = HelpState::new(Screen::Home);
            assert_eq!(state.scroll(), 0);
            assert_eq!(state.origin(), Screen::Home);
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn up_decrements_scroll() {
            let mut state = HelpState::new(Screen::Home);
            state.scroll = 5;
            assert_eq!(state.handle_key(press(KeyCode::Up)), Action::None);
            assert_eq!(state.scroll(), 4);
        }

        #[test]
        fn up_at_zero_saturates() {
            let mut state = HelpState::new(Screen::Home);
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn down_increments_scroll() {
            let mut state = HelpState::new(Screen::Home);
            state.handle_key(press(KeyCode::Down));
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn close_keys() {
            for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::F(1)] {
                let mut state = HelpState::new(FORM);
                assert_eq!(state.handle_key(press(code)), Action::CloseHelp, "{code:?}");
            }
        }

        #[test]
        fn unknown_key_returns_none() {
            let mut state = HelpState::new(Screen::Home);
            assert_eq!(state.handle_key(press(KeyCode::Char('x'))), Action::None);
            assert_eq!(state.scroll(), 0);
        }
    }

    mod help_content_fn {
        use super::*;

        fn content_text(screen: Screen) -> String {
            help_content(screen)
                .into_iter()
                .flat_map(|l| l.spans.into_iter())
                .map(|s| s.content.into_owned())
                .collect()
        }

        #[test]
        fn home_lists_project_keys() {
            let text = content_text(Screen::Home);
            assert!(text.contains("Projects"));
            assert!(text.contains("new project"));
            assert!(!text.contains("After submitting"));
        }

        #[test]
        fn form_section_is_titled_after_the_form() {
            let text = content_text(FORM);
            assert!(text.contains("New Interview"));
            assert!(text.contains("retry a failed submission"));
            assert!(!text.contains("new project"));
        }

        #[test]
        fn every_screen_explains_closing() {
            for screen in [Screen::Home, FORM] {
                assert!(content_text(screen).contains("close"), "{screen:?}");
            }
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_help(state: &HelpState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_help(state, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn title_includes_origin_label() {
            let output = render_help(&HelpState::new(FORM), 80, 30);
            assert!(output.contains("Help"));
            assert!(output.contains("New Interview"));
        }

        #[test]
        fn footer_mentions_close_keys() {
            let output = render_help(&HelpState::new(Screen::Home), 80, 30);
            assert!(output.contains("q/Esc: close"));
        }

        #[test]
        fn scroll_is_capped() {
            let mut state = HelpState::new(Screen::Home);
            for _ in 0..200 {
                state.handle_key(press(KeyCode::Down));
            }
            let output = render_help(&state, 80, 30);
            assert!(output.contains("close"), "last lines stay visible");
        }
    }
}
