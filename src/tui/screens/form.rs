//! Form screen — one schema-driven form with a submit control and status banner.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::component::CHECKED;
use crate::form::{
    FormController, FormSchema, FormValues, SubmissionStatus, SubmitAttempt, SubmitControl,
};
use crate::model::{Account, Project, QuestionKind};
use crate::schemas;
use crate::storage::{ExportFormat, default_export_path};
use crate::tui::action::Action;
use crate::tui::navigation::{FormKind, Screen};
use crate::tui::widgets::{FieldFocus, GridLayout, draw_form, draw_submit_button};

/// State for a form screen.
#[derive(Debug)]
pub struct FormScreenState {
    kind: FormKind,
    controller: FormController,
    focus: FieldFocus,
    control: SubmitControl,
}

impl FormScreenState {
    /// Builds the form for `kind`, pre-filled from the selected project and
    /// the saved profile where relevant.
    pub fn new(kind: FormKind, project: Option<&Project>, account: Option<&Account>) -> Self {
        let schema = schema_for(kind);
        let values = initial_values(kind, &schema, project, account);
        let focus = FieldFocus::new(&schema);
        let mut controller = FormController::with_values(schema, values);
        if kind == FormKind::Export {
            controller = controller.on_change(schemas::sync_export_extension);
        }
        Self {
            kind,
            controller,
            focus,
            control: control_for(kind),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn focus(&self) -> &FieldFocus {
        &self.focus
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    ///
    /// Keys are ignored while a submission is pending.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.controller.status() {
            SubmissionStatus::Pending => Action::None,
            SubmissionStatus::Default => self.handle_edit_key(key),
            SubmissionStatus::Success => self.handle_success_key(key),
            SubmissionStatus::Error => self.handle_error_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.focus.next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus.prev();
                Action::None
            }
            KeyCode::Enter => match self.control.press(&mut self.controller) {
                Some(SubmitAttempt::Started(values)) => Action::Submit(values),
                _ => Action::None,
            },
            KeyCode::Esc => Action::Navigate(Screen::Home),
            _ => {
                self.focus.handle_key(&mut self.controller, key);
                Action::None
            }
        }
    }

    fn handle_success_key(&mut self, key: KeyEvent) -> Action {
        let adds_another = matches!(self.kind, FormKind::NewInterview | FormKind::NewQuestion);
        if key.code != KeyCode::Esc && adds_another {
            self.controller.reset();
            self.focus.reset();
            return Action::None;
        }
        Action::Navigate(Screen::Home)
    }

    fn handle_error_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('r') => match self.controller.begin_submit() {
                SubmitAttempt::Started(values) => Action::Submit(values),
                SubmitAttempt::Busy | SubmitAttempt::Invalid => Action::None,
            },
            KeyCode::Esc => Action::Navigate(Screen::Home),
            _ => {
                self.controller.acknowledge();
                Action::None
            }
        }
    }
}

fn schema_for(kind: FormKind) -> FormSchema {
    match kind {
        FormKind::Register => schemas::registration(),
        FormKind::NewProject => schemas::project(),
        FormKind::NewInterview => schemas::interview(),
        FormKind::NewQuestion => schemas::question(),
        FormKind::Export => schemas::export(),
    }
}

fn control_for(kind: FormKind) -> SubmitControl {
    match kind {
        FormKind::Register => SubmitControl::new("Save profile"),
        FormKind::NewProject => SubmitControl::new("Create project").success_label("Created"),
        FormKind::NewInterview => SubmitControl::new("Add interview").success_label("Added"),
        FormKind::NewQuestion => SubmitControl::new("Add question").success_label("Added"),
        FormKind::Export => SubmitControl::new("Export")
            .pending_label("Exporting…")
            .success_label("Exported"),
    }
}

fn initial_values(
    kind: FormKind,
    schema: &FormSchema,
    project: Option<&Project>,
    account: Option<&Account>,
) -> FormValues {
    let mut values = FormValues::from_schema(schema);
    if kind.needs_project()
        && let Some(project) = project
    {
        values.set("project_id", project.id.clone());
    }
    match kind {
        FormKind::Register => {
            if let Some(account) = account {
                values.set("display_name", account.display_name.clone());
                values.set("email", account.email.clone());
            }
        }
        FormKind::NewQuestion => {
            values.set("kind", QuestionKind::Text.as_str());
        }
        FormKind::Export => {
            let format = ExportFormat::default();
            values.set("format", format.as_str());
            values.set("include_questions", CHECKED);
            if let Some(path) = project.and_then(|p| default_export_path(p, format).ok()) {
                values.set("path", path.display().to_string());
            }
        }
        FormKind::NewProject | FormKind::NewInterview => {}
    }
    values
}

/// One line under the fields describing the submission outcome.
fn banner(state: &FormScreenState) -> Option<Line<'static>> {
    let form = state.controller();
    match form.status() {
        SubmissionStatus::Pending => Some(Line::from(Span::styled(
            "Saving…",
            Style::default().fg(Color::Yellow),
        ))),
        SubmissionStatus::Success => {
            let next = match state.kind() {
                FormKind::NewInterview | FormKind::NewQuestion => "any key: add another  Esc: back",
                _ => "any key: back",
            };
            Some(Line::from(Span::styled(
                format!("Saved. {next}"),
                Style::default().fg(Color::Green),
            )))
        }
        SubmissionStatus::Error => {
            let reason = form
                .error()
                .map_or_else(|| "Submission failed".to_string(), ToString::to_string);
            Some(Line::from(Span::styled(
                format!("{reason}  r: retry  any key: edit"),
                Style::default().fg(Color::Red),
            )))
        }
        SubmissionStatus::Default if !form.report().is_empty() => Some(Line::from(Span::styled(
            format!("Please fix {} field(s)", form.report().len()),
            Style::default().fg(Color::Red),
        ))),
        SubmissionStatus::Default => None,
    }
}

/// Renders a form screen.
#[mutants::skip]
pub fn draw_form_screen(state: &FormScreenState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", state.kind().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid_height = GridLayout::for_schema(state.controller().schema()).height();
    let [form_area, banner_area, button_row, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(grid_height),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(state.controller(), state.focus(), frame, form_area);

    if let Some(line) = banner(state) {
        frame.render_widget(Paragraph::new(line), banner_area);
    }

    let [button_area] = Layout::horizontal([Constraint::Length(24)])
        .flex(Flex::End)
        .areas(button_row);
    draw_submit_button(
        state.control(),
        state.controller().status(),
        frame,
        button_area,
    );

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  ←/→: choose  Space: toggle  Enter: submit  Esc: back",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
