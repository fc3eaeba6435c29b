//! # Program Table Component
//!
//! Scrollable table of all program records, one row per record with the
//! four visible fields in column order. Each row stays associated with
//! its record's id through the selection index, so activating a row can
//! hand the full record to the editor.
//!
//! Transient component (`ProgramTable`) over persistent state
//! (`ProgramTableState`), per ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Row, Table, TableState};

use crate::core::program::Program;

/// Selection state, persisted in `TuiState` across frames.
pub struct ProgramTableState {
    pub table_state: TableState,
    /// Row count at last render, for clamping the selection.
    row_count: usize,
}

impl Default for ProgramTableState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramTableState {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            row_count: 0,
        }
    }

    /// Sync with the current list. Clamps the selection when the list
    /// shrank and drops it when the list is empty.
    pub fn sync(&mut self, programs: &[Program]) {
        self.row_count = programs.len();
        match self.table_state.selected() {
            Some(_) if programs.is_empty() => self.table_state.select(None),
            Some(i) if i >= programs.len() => self.table_state.select(Some(programs.len() - 1)),
            None if !programs.is_empty() => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn select_up(&mut self) {
        if self.row_count == 0 {
            return;
        }
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_down(&mut self) {
        if self.row_count == 0 {
            return;
        }
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some((i + 1).min(self.row_count - 1)));
    }

    /// The record under the cursor, if any.
    pub fn selected<'a>(&self, programs: &'a [Program]) -> Option<&'a Program> {
        self.table_state.selected().and_then(|i| programs.get(i))
    }
}

/// Transient render wrapper: borrowed list plus focus flag as props.
pub struct ProgramTable<'a> {
    pub programs: &'a [Program],
    pub focused: bool,
}

impl<'a> ProgramTable<'a> {
    /// One row per record; the four visible fields in column order.
    fn rows(&self) -> Vec<Row<'a>> {
        self.programs
            .iter()
            .map(|p| {
                Row::new(vec![
                    p.program_desc.clone(),
                    p.date_start.clone(),
                    p.date_end.clone(),
                    p.objective.clone(),
                ])
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut ProgramTableState) {
        state.sync(self.programs);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let widths = [
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Fill(3),
        ];
        let table = Table::new(self.rows(), widths)
            .header(
                Row::new(vec!["Description", "Start", "End", "Objective"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .block(
                Block::bordered()
                    .title(" Programs ")
                    .border_style(border_style),
            );

        frame.render_stateful_widget(table, area, &mut state.table_state);
    }
}
