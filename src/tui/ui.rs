use crate::core::state::App;
use crate::tui::components::{EDITOR_HEIGHT, ProgramTable, TitleBar};
use crate::tui::component::Component;
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Clear, Paragraph};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(EDITOR_HEIGHT), Length(1)]);
    let [title_area, table_area, editor_area, footer_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar {
        status_message: app.status_message.clone(),
        is_loading: app.is_loading,
    };
    title_bar.render(frame, title_area);

    ProgramTable {
        programs: &app.programs,
        focused: tui.focus == Focus::Table,
    }
    .render(frame, table_area, &mut tui.table);

    let editor_focused = tui.focus == Focus::Editor;
    tui.editor
        .render(frame, editor_area, app.editor_mode, editor_focused);

    draw_footer(frame, footer_area, app, tui);

    // The alert modal swallows the cursor along with all input.
    if let Some(alert) = &app.alert {
        draw_alert(frame, alert);
    } else if editor_focused {
        if let Some(position) = tui.editor.cursor_position() {
            frame.set_cursor_position(position);
        }
    }
}

/// Footer line: the error banner when one is active, key hints otherwise.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    if let Some(banner) = &app.banner {
        let error = Span::styled(
            banner.message.as_str(),
            Style::default().fg(Color::White).bg(Color::Red),
        );
        frame.render_widget(error, area);
        return;
    }

    let hints = match tui.focus {
        Focus::Table => "↑/↓ select · Enter edit · n new · r refresh · q quit",
        Focus::Editor => "Tab next field · ^S save · ^D delete · ^R reset · Esc back",
    };
    frame.render_widget(
        Span::styled(hints, Style::default().add_modifier(Modifier::DIM)),
        area,
    );
}

/// Centered blocking modal for validation failures. Any key dismisses it;
/// the main loop suppresses everything else while it's up.
fn draw_alert(frame: &mut Frame, message: &str) {
    let width = (message.len() as u16 + 6).min(frame.area().width);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(format!("{message}\n\npress any key"))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .title(" Invalid input ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(paragraph, area);
}
