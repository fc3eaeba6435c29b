//! # TitleBar Component
//!
//! Single status line at the top: application name, record count or the
//! latest status message, and a loading indicator while a request is in
//! flight. Stateless — all props come from the parent each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub status_message: String,
    pub is_loading: bool,
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.is_loading {
            format!("Regimen | {} | Loading…", self.status_message)
        } else if self.status_message.is_empty() {
            "Regimen".to_string()
        } else {
            format!("Regimen | {}", self.status_message)
        };
        frame.render_widget(Span::raw(title_text), area);
    }
}
