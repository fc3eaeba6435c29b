//! # Editor Form Component
//!
//! The single form used for both creating and updating a program. Four
//! editable fields (description, start date, end date, objective); the
//! record id is not editable — it comes from the core `EditorMode` and is
//! shown in the block title.
//!
//! Follows the persistent-state pattern: `EditorForm` lives in `TuiState`
//! and is rendered each frame with the current mode as props.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::program::{Program, ProgramDraft};
use crate::core::state::EditorMode;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// The four editable fields, in focus-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Desc,
    DateStart,
    DateEnd,
    Objective,
}

impl EditorField {
    const ALL: [EditorField; 4] = [
        EditorField::Desc,
        EditorField::DateStart,
        EditorField::DateEnd,
        EditorField::Objective,
    ];

    fn label(self) -> &'static str {
        match self {
            EditorField::Desc => "Description",
            EditorField::DateStart => "Start date",
            EditorField::DateEnd => "End date",
            EditorField::Objective => "Objective",
        }
    }

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// High-level events the form emits while focused.
#[derive(Debug, PartialEq, Eq)]
pub enum EditorEvent {
    ContentChanged,
    FocusMoved,
}

/// Number of rows the form occupies (four fields + borders).
pub const EDITOR_HEIGHT: u16 = 6;

pub struct EditorForm {
    pub desc: String,
    pub date_start: String,
    pub date_end: String,
    pub objective: String,
    pub focus: EditorField,
    /// Screen position for the terminal cursor, cached during render.
    cursor_position: Option<Position>,
}

impl Default for EditorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorForm {
    pub fn new() -> Self {
        Self {
            desc: String::new(),
            date_start: String::new(),
            date_end: String::new(),
            objective: String::new(),
            focus: EditorField::Desc,
            cursor_position: None,
        }
    }

    /// Clear every field and return focus to the description field.
    pub fn reset(&mut self) {
        self.desc.clear();
        self.date_start.clear();
        self.date_end.clear();
        self.objective.clear();
        self.focus = EditorField::Desc;
    }

    /// Populate the fields from an existing record for editing.
    pub fn load(&mut self, program: &Program) {
        self.desc = program.program_desc.clone();
        self.date_start = program.date_start.clone();
        self.date_end = program.date_end.clone();
        self.objective = program.objective.clone();
        self.focus = EditorField::Desc;
    }

    /// Read the current field values back out as a draft.
    pub fn draft(&self) -> ProgramDraft {
        ProgramDraft {
            program_desc: self.desc.clone(),
            date_start: self.date_start.clone(),
            date_end: self.date_end.clone(),
            objective: self.objective.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.desc.is_empty()
            && self.date_start.is_empty()
            && self.date_end.is_empty()
            && self.objective.is_empty()
    }

    fn buffer_mut(&mut self, field: EditorField) -> &mut String {
        match field {
            EditorField::Desc => &mut self.desc,
            EditorField::DateStart => &mut self.date_start,
            EditorField::DateEnd => &mut self.date_end,
            EditorField::Objective => &mut self.objective,
        }
    }

    fn buffer(&self, field: EditorField) -> &str {
        match field {
            EditorField::Desc => &self.desc,
            EditorField::DateStart => &self.date_start,
            EditorField::DateEnd => &self.date_end,
            EditorField::Objective => &self.objective,
        }
    }

    /// Where the terminal cursor should be, if the form was rendered
    /// focused this frame.
    pub fn cursor_position(&self) -> Option<Position> {
        self.cursor_position
    }

    /// Render the form. `mode` supplies the title (new vs. editing #id);
    /// `focused` controls field highlighting and cursor placement.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, mode: EditorMode, focused: bool) {
        let title = match mode {
            EditorMode::Create => " New program ".to_string(),
            EditorMode::Edit { id } => format!(" Editing program #{id} "),
        };
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(1); 4]).split(inner);
        self.cursor_position = None;

        for (field, row) in EditorField::ALL.into_iter().zip(rows.iter()) {
            let is_focused = focused && field == self.focus;
            let label_style = if is_focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let label = format!("{:<12}", field.label());
            let line = Line::from(vec![
                Span::styled(label.clone(), label_style),
                Span::raw(self.buffer(field)),
            ]);
            frame.render_widget(Paragraph::new(line), *row);

            if is_focused {
                // Place the cursor just past the field's text. Width, not
                // byte length: CJK descriptions occupy two columns a char.
                let x = row.x
                    + label.width() as u16
                    + self.buffer(field).width() as u16;
                self.cursor_position = Some(Position::new(x.min(row.right()), row.y));
            }
        }
    }
}

impl EventHandler for EditorForm {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditorEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer_mut(self.focus).push(*c);
                Some(EditorEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.buffer_mut(self.focus).pop();
                Some(EditorEvent::ContentChanged)
            }
            // Enter advances to the next field, same as Tab.
            TuiEvent::Tab | TuiEvent::Submit => {
                self.focus = self.focus.next();
                Some(EditorEvent::FocusMoved)
            }
            TuiEvent::BackTab => {
                self.focus = self.focus.prev();
                Some(EditorEvent::FocusMoved)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_program;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(form: &mut EditorForm, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_reset_clears_all_fields_and_refocuses_description() {
        let mut form = EditorForm::new();
        form.load(&test_program(3, "Strength"));
        form.focus = EditorField::Objective;

        form.reset();

        assert!(form.is_empty());
        assert_eq!(form.focus, EditorField::Desc);
        assert_eq!(form.draft(), ProgramDraft::default());
    }

    #[test]
    fn test_load_populates_every_field() {
        let mut form = EditorForm::new();
        let program = test_program(3, "Strength");
        form.load(&program);

        let draft = form.draft();
        assert_eq!(draft.program_desc, program.program_desc);
        assert_eq!(draft.date_start, program.date_start);
        assert_eq!(draft.date_end, program.date_end);
        assert_eq!(draft.objective, program.objective);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = EditorForm::new();
        typed(&mut form, "Peak");
        form.handle_event(&TuiEvent::Tab);
        typed(&mut form, "2024-01-01");

        assert_eq!(form.desc, "Peak");
        assert_eq!(form.date_start, "2024-01-01");
        assert!(form.date_end.is_empty());
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut form = EditorForm::new();
        typed(&mut form, "abc");
        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.desc, "ab");

        // Backspace on an empty field is a no-op.
        let mut empty = EditorForm::new();
        empty.handle_event(&TuiEvent::Backspace);
        assert!(empty.desc.is_empty());
    }

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut form = EditorForm::new();
        assert_eq!(form.focus, EditorField::Desc);
        form.handle_event(&TuiEvent::Tab);
        assert_eq!(form.focus, EditorField::DateStart);
        form.handle_event(&TuiEvent::Tab);
        assert_eq!(form.focus, EditorField::DateEnd);
        form.handle_event(&TuiEvent::Tab);
        assert_eq!(form.focus, EditorField::Objective);
        form.handle_event(&TuiEvent::Tab);
        assert_eq!(form.focus, EditorField::Desc);

        form.handle_event(&TuiEvent::BackTab);
        assert_eq!(form.focus, EditorField::Objective);
    }

    #[test]
    fn test_render_shows_title_per_mode() {
        let backend = TestBackend::new(60, EDITOR_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = EditorForm::new();
        form.load(&test_program(7, "Strength"));

        terminal
            .draw(|f| form.render(f, f.area(), EditorMode::Edit { id: 7 }, true))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Editing program #7"));
        assert!(text.contains("Strength"));
        assert!(form.cursor_position().is_some());
    }
}
