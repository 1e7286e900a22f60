//! Home screen — lists projects and opens the forms that act on them.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::Project;
use crate::tui::action::Action;
use crate::tui::navigation::{FormKind, Screen};

/// State for the home screen.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Cached list of projects, newest first.
    projects: Vec<Project>,
    /// Index of the highlighted project, or `None` if the list is empty.
    selected: Option<usize>,
    /// Error message from the last failed operation.
    error: Option<String>,
    /// `d` was pressed; the next `y` deletes the selected project.
    confirm_delete: bool,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the project list, keeping the same project highlighted when
    /// it is still present.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        let previous = self.selected_project().map(|p| p.id.clone());
        self.projects = projects;
        self.selected = previous
            .and_then(|id| self.projects.iter().position(|p| p.id == id))
            .or(if self.projects.is_empty() { None } else { Some(0) });
        self.error = None;
        self.confirm_delete = false;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.confirm_delete {
            self.confirm_delete = false;
            return match (key.code, self.selected_project()) {
                (KeyCode::Char('y' | 'Y'), Some(project)) => {
                    Action::DeleteProject(project.id.clone())
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Char('n') => Action::Navigate(Screen::Form(FormKind::NewProject)),
            KeyCode::Char('p') => Action::Navigate(Screen::Form(FormKind::Register)),
            KeyCode::Char('i') => self.open_for_project(FormKind::NewInterview),
            KeyCode::Char('a') => self.open_for_project(FormKind::NewQuestion),
            KeyCode::Char('x') => self.open_for_project(FormKind::Export),
            KeyCode::Char('d') => {
                if self.selected.is_some() {
                    self.confirm_delete = true;
                }
                Action::None
            }
            KeyCode::Char('?') => Action::ShowHelp,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the highlighted project, if any.
    pub fn selected_project(&self) -> Option<&Project> {
        self.selected.and_then(|i| self.projects.get(i))
    }

    /// Returns `true` while waiting for the delete confirmation.
    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets an error message to display on this screen.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    fn open_for_project(&mut self, kind: FormKind) -> Action {
        if self.selected_project().is_some() {
            Action::Navigate(Screen::Form(kind))
        } else {
            self.error = Some("Create or select a project first".into());
            Action::None
        }
    }

    /// Moves the selection up by one (no wrap).
    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    /// Moves the selection down by one (no wrap).
    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.projects.len() => Some(i + 1),
            other => other,
        };
    }
}

/// Renders the home screen.
#[mutants::skip]
pub fn draw_home(state: &HomeState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Projects ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    if state.projects().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("No projects yet."),
            Line::from("Press 'n' to create one."),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            table_area,
        );
    } else {
        let header = Row::new(vec!["Name", "Created", "Interviews", "Questions"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);

        let rows: Vec<Row> = state
            .projects()
            .iter()
            .enumerate()
            .map(|(i, project)| {
                let style = if state.selected() == Some(i) {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    project.name.clone(),
                    project.created_at.format("%Y-%m-%d").to_string(),
                    project.interviews.len().to_string(),
                    project.questions.len().to_string(),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(10),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(err)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(err_line, footer_area);
    } else if state.is_confirming_delete() {
        let prompt = Paragraph::new("Delete this project? y: yes  any key: cancel")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(prompt, footer_area);
    } else {
        let footer = Paragraph::new("n: new  i: interview  a: question  x: export  p: profile  d: delete  q: quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}
