//! Screen routing with an optional unsaved-changes guard.

use tracing::debug;

use crate::form::{NavigationDecision, UnsavedChangesGuard};

/// Which form a [`Screen::Form`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// Create or replace the operator profile.
    Register,
    NewProject,
    /// Add an interview to the selected project.
    NewInterview,
    /// Add a question to the selected project.
    NewQuestion,
    /// Export the selected project.
    Export,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Register => "Profile",
            Self::NewProject => "New Project",
            Self::NewInterview => "New Interview",
            Self::NewQuestion => "New Question",
            Self::Export => "Export Project",
        }
    }

    /// Whether the form belongs to a selected project.
    pub fn needs_project(self) -> bool {
        matches!(self, Self::NewInterview | Self::NewQuestion | Self::Export)
    }
}

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Project list.
    Home,
    Form(FormKind),
}

impl Screen {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Projects",
            Self::Form(kind) => kind.title(),
        }
    }
}

/// Tracks the current screen and consults the guard before leaving it.
#[derive(Debug)]
pub struct Navigator {
    current: Screen,
    guard: Option<UnsavedChangesGuard>,
}

impl Navigator {
    pub fn new(start: Screen) -> Self {
        Self {
            current: start,
            guard: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Installs a guard owned by the current screen. It starts detached.
    pub fn install_guard(&mut self, guard: UnsavedChangesGuard) {
        self.guard = Some(guard);
    }

    /// Attaches the guard while the current screen has unsaved changes.
    pub fn sync_unsaved(&mut self, has_unsaved_changes: bool) {
        if let Some(guard) = self.guard.as_mut() {
            guard.sync(has_unsaved_changes);
        }
    }

    /// Returns `true` if a navigation attempt would prompt.
    pub fn is_guarded(&self) -> bool {
        self.guard.as_ref().is_some_and(UnsavedChangesGuard::is_attached)
    }

    /// Attempts to move to `to`.
    ///
    /// On [`NavigationDecision::Allow`] the current screen's guard is torn
    /// down with it. On [`NavigationDecision::Block`] nothing changes.
    pub fn navigate(&mut self, to: Screen) -> NavigationDecision {
        if to == self.current {
            return NavigationDecision::Allow;
        }
        let decision = self
            .guard
            .as_mut()
            .map_or(NavigationDecision::Allow, UnsavedChangesGuard::intercept);
        match decision {
            NavigationDecision::Allow => {
                debug!(from = ?self.current, to = ?to, "navigate");
                self.guard = None;
                self.current = to;
            }
            NavigationDecision::Block => {
                debug!(from = ?self.current, to = ?to, "navigation kept on current screen");
            }
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn guard(answer: bool) -> (Rc<Cell<usize>>, UnsavedChangesGuard) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let guard = UnsavedChangesGuard::new(move |_: &str| {
            seen.set(seen.get() + 1);
            answer
        });
        (calls, guard)
    }

    const FORM: Screen = Screen::Form(FormKind::NewProject);

    #[test]
    fn unguarded_navigation_is_allowed() {
        let mut nav = Navigator::new(Screen::Home);
        assert_eq!(nav.navigate(FORM), NavigationDecision::Allow);
        assert_eq!(nav.current(), FORM);
    }

    #[test]
    fn clean_form_leaves_without_prompt() {
        let (calls, g) = guard(false);
        let mut nav = Navigator::new(FORM);
        nav.install_guard(g);
        nav.sync_unsaved(false);
        assert_eq!(nav.navigate(Screen::Home), NavigationDecision::Allow);
        assert_eq!(calls.get(), 0);
        assert_eq!(nav.current(), Screen::Home);
    }

    #[test]
    fn dirty_form_declined_stays() {
        let (calls, g) = guard(false);
        let mut nav = Navigator::new(FORM);
        nav.install_guard(g);
        nav.sync_unsaved(true);
        assert_eq!(nav.navigate(Screen::Home), NavigationDecision::Block);
        assert_eq!(calls.get(), 1);
        assert_eq!(nav.current(), FORM);
        assert!(nav.is_guarded());
    }

    #[test]
    fn dirty_form_confirmed_leaves_and_tears_down_guard() {
        let (calls, g) = guard(true);
        let mut nav = Navigator::new(FORM);
        nav.install_guard(g);
        nav.sync_unsaved(true);
        assert_eq!(nav.navigate(Screen::Home), NavigationDecision::Allow);
        assert_eq!(calls.get(), 1);
        assert!(!nav.is_guarded());
        assert_eq!(nav.navigate(FORM), NavigationDecision::Allow);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn navigating_to_current_screen_never_prompts() {
        let (calls, g) = guard(false);
        let mut nav = Navigator::new(FORM);
        nav.install_guard(g);
        nav.sync_unsaved(true);
        assert_eq!(nav.navigate(FORM), NavigationDecision::Allow);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn labels() {
        assert_eq!(Screen::Home.label(), "Projects");
        assert_eq!(Screen::Form(FormKind::Export).label(), "Export Project");
    }

    #[test]
    fn project_scoped_forms() {
        assert!(FormKind::NewQuestion.needs_project());
        assert!(!FormKind::NewProject.needs_project());
        assert!(!FormKind::Register.needs_project());
    }
}
