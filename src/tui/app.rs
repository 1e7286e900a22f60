use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::{Builder, Runtime};
use tracing::warn;

use crate::config::Config;
use crate::form::{FormValues, SubmitHandler, UnsavedChangesGuard};
use crate::model::Account;
use crate::storage::Store;

use super::action::Action;
use super::error::AppError;
use super::handler::StoreHandler;
use super::navigation::{FormKind, Navigator, Screen};
use super::prompt::default_guard;
use super::screens::{
    FormScreenState, HelpState, HomeState, draw_form_screen, draw_help, draw_home,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// Builds the guard installed on every form screen.
type GuardFactory = Box<dyn Fn() -> UnsavedChangesGuard>;

/// Top-level application state.
pub struct App {
    navigator: Navigator,
    runtime: Runtime,
    store: Store,
    home: HomeState,
    form: Option<FormScreenState>,
    help: Option<HelpState>,
    account: Option<Account>,
    make_guard: GuardFactory,
    /// Values of the submission the next loop iteration will run.
    in_flight: Option<FormValues>,
    should_quit: bool,
    /// The guard prompt drew over the frame; repaint everything.
    needs_clear: bool,
}

impl App {
    /// Creates an `App` over the configured data directory that asks on the
    /// terminal before discarding unsaved changes.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Self::with_guard(&config.data_dir, default_guard)
    }

    /// Creates an `App` starting on [`Screen::Home`] whose forms are guarded
    /// by guards from `make_guard`.
    pub fn with_guard(
        data_dir: &Path,
        make_guard: impl Fn() -> UnsavedChangesGuard + 'static,
    ) -> Result<Self, AppError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let store = runtime.block_on(Store::open(data_dir))?;
        let account = runtime.block_on(store.load_account())?;
        let mut app = Self {
            navigator: Navigator::new(Screen::Home),
            runtime,
            store,
            home: HomeState::new(),
            form: None,
            help: None,
            account,
            make_guard: Box::new(make_guard),
            in_flight: None,
            should_quit: false,
            needs_clear: false,
        };
        app.reload_projects();
        Ok(app)
    }

    /// Main event loop: draw → run pending submission or read event → dispatch.
    ///
    /// A submission is drawn in its pending state before the handler runs.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            if self.needs_clear {
                terminal.clear()?;
                self.needs_clear = false;
            }
            terminal.draw(|frame| self.draw(frame))?;
            if self.in_flight.is_some() {
                self.complete_submission();
                continue;
            }
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [status_area, main_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        draw_status_bar(&self.status_context(), frame, status_area);

        match (self.navigator.current(), &self.form) {
            (Screen::Form(_), Some(form)) => draw_form_screen(form, frame, main_area),
            _ => draw_home(&self.home, frame, main_area),
        }

        if let Some(help) = &self.help {
            draw_help(help, frame, main_area);
        }
    }

    fn status_context(&self) -> StatusBarContext {
        let project = self.home.selected_project();
        StatusBarContext {
            operator: self.account.as_ref().map(|a| a.display_name.clone()),
            project: project.map(|p| p.name.clone()),
            interviews: project.map_or(0, |p| p.interviews.len()),
            questions: project.map_or(0, |p| p.questions.len()),
        }
    }

    /// Handles a key event: help overlay first, then F1, then the current screen.
    ///
    /// Every key is ignored while a submission is in flight.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.in_flight.is_some() {
            return;
        }

        let action = if let Some(help) = self.help.as_mut() {
            help.handle_key(key)
        } else if key.code == KeyCode::F(1) {
            Action::ShowHelp
        } else {
            match self.navigator.current() {
                Screen::Home => self.home.handle_key(key),
                Screen::Form(_) => self
                    .form
                    .as_mut()
                    .map_or(Action::None, |form| form.handle_key(key)),
            }
        };
        self.apply(action);
        self.sync_guard();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Submit(values) => self.in_flight = Some(values),
            Action::DeleteProject(id) => self.delete_project(&id),
            Action::ShowHelp => self.help = Some(HelpState::new(self.navigator.current())),
            Action::CloseHelp => self.help = None,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Moves to `to` unless the current form's guard blocks it.
    fn navigate(&mut self, to: Screen) {
        if to == self.navigator.current() {
            return;
        }
        if self.navigator.is_guarded() {
            self.needs_clear = true;
        }
        if !self.navigator.navigate(to).is_allowed() {
            return;
        }
        match to {
            Screen::Home => {
                self.form = None;
                self.reload_projects();
            }
            Screen::Form(kind) => {
                let project = if kind.needs_project() {
                    self.home.selected_project()
                } else {
                    None
                };
                self.form = Some(FormScreenState::new(kind, project, self.account.as_ref()));
                self.navigator.install_guard((self.make_guard)());
            }
        }
    }

    /// Attaches the form's guard exactly while it has unsaved changes.
    fn sync_guard(&mut self) {
        if let Some(form) = &self.form {
            self.navigator
                .sync_unsaved(form.controller().has_unsaved_changes());
        }
    }

    /// Runs the in-flight submission's handler to completion and settles
    /// the form with its outcome.
    pub fn complete_submission(&mut self) {
        let Some(values) = self.in_flight.take() else {
            return;
        };
        let Some(form) = self.form.as_mut() else {
            warn!("submission finished without a form");
            return;
        };
        let kind = form.kind();
        let handler = StoreHandler::new(&self.store, kind);
        let result = self.runtime.block_on(handler.submit(values));
        let succeeded = result.is_ok();
        form.controller_mut().settle(result);
        if succeeded {
            self.after_success(kind);
        }
        self.sync_guard();
    }

    fn after_success(&mut self, kind: FormKind) {
        match kind {
            FormKind::Register => self.reload_account(),
            FormKind::Export => {}
            FormKind::NewProject | FormKind::NewInterview | FormKind::NewQuestion => {
                self.reload_projects();
            }
        }
    }

    fn delete_project(&mut self, id: &str) {
        if let Err(e) = self.runtime.block_on(self.store.delete_project(id)) {
            self.home.set_error(format!("Could not delete project: {e}"));
            return;
        }
        self.reload_projects();
    }

    fn reload_projects(&mut self) {
        match self.runtime.block_on(self.store.list_projects()) {
            Ok(projects) => self.home.set_projects(projects),
            Err(e) => {
                warn!(error = %e, "failed to list projects");
                self.home.set_error(format!("Could not load projects: {e}"));
            }
        }
    }

    fn reload_account(&mut self) {
        match self.runtime.block_on(self.store.load_account()) {
            Ok(account) => self.account = account,
            Err(e) => warn!(error = %e, "failed to reload profile"),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns `true` while a submission waits to run.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_help_open(&self) -> bool {
        self.help.is_some()
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    /// Returns the open form, if the current screen is one.
    pub fn form(&self) -> Option<&FormScreenState> {
        self.form.as_ref()
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }
}
