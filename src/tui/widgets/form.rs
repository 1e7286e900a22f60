//! Schema-driven form renderer on a 12-column grid.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::{
    FieldDescriptor, FieldKind, FormController, FormSchema, GRID_COLUMNS, InputType,
    SelectOption, message_for,
};

/// Height of one grid row: border, value, border (the error overlaps the bottom border).
const ROW_HEIGHT: u16 = 3;

/// Placement of a schema's fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridLayout {
    /// Visible fields packed into rows of at most 12 columns: `(name, span)`.
    pub rows: Vec<Vec<(String, u8)>>,
    /// Hidden fields, which get no slot.
    pub hidden: Vec<String>,
}

impl GridLayout {
    /// Packs visible fields in declaration order, starting a new row when
    /// the next span would overflow the grid.
    pub fn for_schema(schema: &FormSchema) -> Self {
        let mut layout = Self::default();
        let mut row: Vec<(String, u8)> = Vec::new();
        let mut used = 0_u8;
        for field in schema.fields() {
            if field.is_hidden() {
                layout.hidden.push(field.name.clone());
                continue;
            }
            let span = field.columns.clamp(1, GRID_COLUMNS);
            if used + span > GRID_COLUMNS {
                layout.rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push((field.name.clone(), span));
            used += span;
        }
        if !row.is_empty() {
            layout.rows.push(row);
        }
        layout
    }

    /// Terminal rows needed to draw the grid.
    pub fn height(&self) -> u16 {
        ROW_HEIGHT * self.rows.len() as u16
    }
}

/// Which visible field has keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFocus {
    order: Vec<String>,
    index: usize,
}

impl FieldFocus {
    /// Focus starts on the first visible field.
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            order: schema.visible_fields().map(|f| f.name.clone()).collect(),
            index: 0,
        }
    }

    /// Name of the focused field, if the form has any visible field.
    pub fn current(&self) -> Option<&str> {
        self.order.get(self.index).map(String::as_str)
    }

    /// Moves focus to the next field, wrapping around.
    pub fn next(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.order.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn prev(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.index = (self.index + self.order.len() - 1) % self.order.len();
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Applies an editing key to the focused field.
    ///
    /// Returns `false` without touching the form while it is locked or when
    /// the key means nothing to the focused field.
    pub fn handle_key(&self, form: &mut FormController, key: KeyEvent) -> bool {
        if form.is_locked() {
            return false;
        }
        let Some(name) = self.current() else {
            return false;
        };
        let Some(field) = form.schema().field(name).cloned() else {
            return false;
        };
        match (&field.kind, key.code) {
            (FieldKind::Input { input_type }, KeyCode::Char(ch)) if input_type.accepts(ch) => {
                form.edit(name, |v| v.push(ch))
            }
            (FieldKind::Input { .. }, KeyCode::Backspace) => form.edit(name, |v| {
                v.pop();
            }),
            (FieldKind::Select { options }, KeyCode::Right | KeyCode::Char(' ')) => {
                let next = step_option(options, form.values().get(name), 1);
                form.set_value(name, next)
            }
            (FieldKind::Select { options }, KeyCode::Left) => {
                let prev = step_option(options, form.values().get(name), -1);
                form.set_value(name, prev)
            }
            (FieldKind::Component(widget), _) => {
                let mut value = form.values().get(name).to_string();
                widget.handle_key(&mut value, key) && form.set_value(name, value)
            }
            _ => false,
        }
    }
}

/// Value of the option `delta` steps from `current`, wrapping. An unset
/// select steps onto the first or last option.
fn step_option(options: &[SelectOption], current: &str, delta: isize) -> String {
    if options.is_empty() {
        return String::new();
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|o| o.value == current) {
        Some(i) => (i as isize + delta).rem_euclid(len),
        None if delta >= 0 => 0,
        None => len - 1,
    };
    options[next as usize].value.clone()
}

/// Text shown inside a field's box, and whether it is a placeholder.
fn display_value(field: &FieldDescriptor, value: &str) -> (String, bool) {
    let placeholder = || field.placeholder.clone().unwrap_or_default();
    match &field.kind {
        FieldKind::Input { .. } | FieldKind::Select { .. } if value.is_empty() => {
            (placeholder(), true)
        }
        FieldKind::Input {
            input_type: InputType::Password,
        } => ("•".repeat(value.chars().count()), false),
        FieldKind::Input { .. } => (value.to_string(), false),
        FieldKind::Select { options } => {
            let label = options
                .iter()
                .find(|o| o.value == value)
                .map_or_else(|| value.to_string(), |o| o.label.clone());
            (label, false)
        }
        FieldKind::Component(widget) => (widget.display(value), false),
        FieldKind::Hidden { .. } => (String::new(), false),
    }
}

/// Renders every visible field of `form` within `area`.
///
/// While the form is locked all fields are drawn muted and no cursor is shown.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &FormController, focus: &FieldFocus, frame: &mut Frame, area: Rect) {
    let schema = form.schema();
    let layout = GridLayout::for_schema(schema);
    let locked = form.is_locked();

    let rows = Layout::vertical(layout.rows.iter().map(|_| Constraint::Length(ROW_HEIGHT)))
        .split(area);

    for (row, row_area) in layout.rows.iter().zip(rows.iter()) {
        let used: u32 = row.iter().map(|(_, span)| u32::from(*span)).sum();
        let mut constraints: Vec<Constraint> = row
            .iter()
            .map(|(_, span)| Constraint::Ratio(u32::from(*span), u32::from(GRID_COLUMNS)))
            .collect();
        if used < u32::from(GRID_COLUMNS) {
            constraints.push(Constraint::Ratio(
                u32::from(GRID_COLUMNS) - used,
                u32::from(GRID_COLUMNS),
            ));
        }
        let cells = Layout::horizontal(constraints).split(*row_area);

        for ((name, _), cell) in row.iter().zip(cells.iter()) {
            let Some(field) = schema.field(name) else {
                continue;
            };
            let is_focused = !locked && focus.current() == Some(name.as_str());
            draw_field(form, field, is_focused, locked, frame, *cell);
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_field(
    form: &FormController,
    field: &FieldDescriptor,
    is_focused: bool,
    locked: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let error = form
        .report()
        .get(&field.name)
        .map(|code| message_for(field, code));

    let border_color = if locked {
        Color::DarkGray
    } else if error.is_some() {
        Color::Red
    } else if is_focused {
        Color::Yellow
    } else {
        Color::Gray
    };

    let label = if form.schema().is_required(&field.name) {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let (text, is_placeholder) = display_value(field, form.values().get(&field.name));
    let text_style = if locked {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if is_placeholder {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled(text, text_style)];
    if is_focused {
        let hint = match field.kind {
            FieldKind::Select { .. } => " ◂▸",
            _ => "\u{2588}",
        };
        spans.push(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if let Some(err) = error {
        let err_area = Rect {
            x: area.x + 2,
            y: area.y + ROW_HEIGHT.saturating_sub(1),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(err, Style::default().fg(Color::Red))),
            err_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::form::{Checkbox, ErrorCode, Rule, SubmitError};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn schema() -> FormSchema {
        FormSchema::builder("demo")
            .field(FieldDescriptor::hidden("project_id", "p-1"))
            .field(
                FieldDescriptor::input("email", "Email", InputType::Email)
                    .message(ErrorCode::Format, "Please enter a valid email address"),
            )
            .field(FieldDescriptor::input("age", "Age", InputType::Number).columns(4))
            .field(
                FieldDescriptor::select(
                    "kind",
                    "Kind",
                    vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")],
                )
                .columns(4),
            )
            .field(FieldDescriptor::component("ok", "Agree", Arc::new(Checkbox)).columns(6))
            .field(FieldDescriptor::input("pw", "Password", InputType::Password).columns(6))
            .rule("email", Rule::Email)
            .build()
            .unwrap()
    }

    fn setup() -> (FormController, FieldFocus) {
        let schema = schema();
        let focus = FieldFocus::new(&schema);
        (FormController::new(schema), focus)
    }

    fn type_str(focus: &FieldFocus, form: &mut FormController, s: &str) {
        for ch in s.chars() {
            focus.handle_key(form, press(KeyCode::Char(ch)));
        }
    }

    mod grid {
        use super::*;

        #[test]
        fn packs_spans_into_rows() {
            let layout = GridLayout::for_schema(&schema());
            let names: Vec<Vec<&str>> = layout
                .rows
                .iter()
                .map(|r| r.iter().map(|(n, _)| n.as_str()).collect())
                .collect();
            assert_eq!(
                names,
                vec![vec!["email"], vec!["age", "kind"], vec!["ok", "pw"]]
            );
            assert_eq!(layout.hidden, vec!["project_id"]);
            assert_eq!(layout.height(), 9);
        }

        #[test]
        fn default_span_is_full_width() {
            let layout = GridLayout::for_schema(&schema());
            assert_eq!(layout.rows[0], vec![("email".to_string(), 12)]);
        }

        #[quickcheck]
        fn rows_never_overflow_and_visible_set_is_preserved(spans: Vec<(u8, bool)>) -> bool {
            let mut builder = FormSchema::builder("q");
            for (i, (span, hidden)) in spans.iter().enumerate() {
                let name = format!("f{i}");
                builder = builder.field(if *hidden {
                    FieldDescriptor::hidden(name, "")
                } else {
                    FieldDescriptor::input(name, "F", InputType::Text).columns(span % 12 + 1)
                });
            }
            let schema = builder.build().unwrap();
            let layout = GridLayout::for_schema(&schema);

            let fits = layout
                .rows
                .iter()
                .all(|r| r.iter().map(|(_, s)| u32::from(*s)).sum::<u32>() <= 12);
            let placed: Vec<&str> = layout
                .rows
                .iter()
                .flatten()
                .map(|(n, _)| n.as_str())
                .collect();
            let visible: Vec<&str> = schema.visible_fields().map(|f| f.name.as_str()).collect();
            let hidden: Vec<&str> = schema.hidden_fields().map(|f| f.name.as_str()).collect();
            fits && placed == visible && layout.hidden == hidden
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn skips_hidden_fields() {
            let (_, focus) = setup();
            assert_eq!(focus.current(), Some("email"));
        }

        #[test]
        fn wraps_both_ways() {
            let (_, mut focus) = setup();
            focus.prev();
            assert_eq!(focus.current(), Some("pw"));
            focus.next();
            assert_eq!(focus.current(), Some("email"));
        }

        #[test]
        fn empty_schema_has_no_focus() {
            let schema = FormSchema::builder("e").build().unwrap();
            let mut focus = FieldFocus::new(&schema);
            focus.next();
            focus.prev();
            assert_eq!(focus.current(), None);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn typing_fills_focused_input() {
            let (mut form, focus) = setup();
            type_str(&focus, &mut form, "a@b.co");
            assert_eq!(form.values().get("email"), "a@b.co");
        }

        #[test]
        fn backspace_deletes() {
            let (mut form, focus) = setup();
            type_str(&focus, &mut form, "ab");
            focus.handle_key(&mut form, press(KeyCode::Backspace));
            assert_eq!(form.values().get("email"), "a");
        }

        #[test]
        fn number_input_rejects_letters() {
            let (mut form, mut focus) = setup();
            focus.next();
            type_str(&focus, &mut form, "4x2");
            assert_eq!(form.values().get("age"), "42");
        }

        #[test]
        fn select_cycles_options() {
            let (mut form, mut focus) = setup();
            focus.next();
            focus.next();
            assert!(focus.handle_key(&mut form, press(KeyCode::Right)));
            assert_eq!(form.values().get("kind"), "a");
            focus.handle_key(&mut form, press(KeyCode::Right));
            assert_eq!(form.values().get("kind"), "b");
            focus.handle_key(&mut form, press(KeyCode::Right));
            assert_eq!(form.values().get("kind"), "a");
            focus.handle_key(&mut form, press(KeyCode::Left));
            assert_eq!(form.values().get("kind"), "b");
        }

        #[test]
        fn component_receives_keys() {
            let (mut form, mut focus) = setup();
            focus.prev();
            focus.prev();
            assert_eq!(focus.current(), Some("ok"));
            assert!(focus.handle_key(&mut form, press(KeyCode::Char(' '))));
            assert!(Checkbox::is_checked(form.values().get("ok")));
            assert!(!focus.handle_key(&mut form, press(KeyCode::Char('z'))));
        }

        #[test]
        fn locked_form_ignores_keys() {
            let (mut form, focus) = setup();
            type_str(&focus, &mut form, "a@b.co");
            form.begin_submit();
            assert!(!focus.handle_key(&mut form, press(KeyCode::Char('x'))));
            assert!(!focus.handle_key(&mut form, press(KeyCode::Backspace)));
            assert_eq!(form.values().get("email"), "a@b.co");
        }

        #[test]
        fn error_status_also_locks() {
            let (mut form, focus) = setup();
            form.begin_submit();
            form.settle(Err(SubmitError::Rejected("x".into())));
            assert!(!focus.handle_key(&mut form, press(KeyCode::Char('x'))));
        }

        #[test]
        fn success_status_also_locks() {
            let (mut form, mut focus) = setup();
            type_str(&focus, &mut form, "a@b.co");
            form.begin_submit();
            assert!(form.settle(Ok(())));
            assert!(form.is_locked());
            assert!(!focus.handle_key(&mut form, press(KeyCode::Char('x'))));
            assert!(!focus.handle_key(&mut form, press(KeyCode::Backspace)));
            focus.prev();
            focus.prev();
            assert!(!focus.handle_key(&mut form, press(KeyCode::Char(' '))));
            assert_eq!(form.values().get("email"), "a@b.co");
            assert!(!Checkbox::is_checked(form.values().get("ok")));
        }
    }

    mod display {
        use super::*;

        #[test]
        fn password_is_masked() {
            let schema = schema();
            let (text, placeholder) = display_value(schema.field("pw").unwrap(), "abc");
            assert_eq!(text, "•••");
            assert!(!placeholder);
        }

        #[test]
        fn empty_input_shows_placeholder() {
            let field = FieldDescriptor::input("a", "A", InputType::Text).placeholder("type here");
            assert_eq!(display_value(&field, ""), ("type here".to_string(), true));
        }

        #[test]
        fn select_shows_option_label() {
            let schema = schema();
            let (text, _) = display_value(schema.field("kind").unwrap(), "b");
            assert_eq!(text, "Beta");
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

        fn render(form: &FormController, focus: &FieldFocus) -> String {
            let backend = TestBackend::new(80, 12);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_form(form, focus, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn shows_visible_labels_only() {
            let (form, focus) = setup();
            let output = render(&form, &focus);
            for label in ["Email", "Age", "Kind", "Agree", "Password"] {
                assert!(output.contains(label), "missing {label}");
            }
            assert!(!output.contains("project_id"), "hidden field leaked");
        }

        #[test]
        fn shows_mapped_error_message() {
            let (mut form, focus) = setup();
            type_str(&focus, &mut form, "not-an-email");
            form.begin_submit();
            let output = render(&form, &focus);
            assert!(output.contains("Please enter a valid email"));
        }

        #[test]
        fn cursor_shown_only_when_editable() {
            let (mut form, focus) = setup();
            assert!(render(&form, &focus).contains('\u{2588}'));
            form.begin_submit();
            assert!(!render(&form, &focus).contains('\u{2588}'));
        }
    }
}
