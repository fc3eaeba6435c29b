use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events. Interpretation is modal: the main loop
/// decides what an event means based on which pane has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    InputChar(char),
    Backspace,
    /// Enter: activates a table row or moves to the next editor field.
    Submit,
    Escape,
    Tab,
    BackTab,
    CursorUp,
    CursorDown,
    /// Ctrl+S — submit the editor (create or update per mode).
    Save,
    /// Ctrl+D — delete the record loaded in the editor.
    Delete,
    /// Ctrl+R — reset the editor.
    Reset,
    /// Ctrl+C — always quits regardless of focus.
    ForceQuit,
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap_or(false) {
        translate(event::read().ok()?)
    } else {
        None
    }
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Save),
                (KeyModifiers::CONTROL, KeyCode::Char('d')) => Some(TuiEvent::Delete),
                (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::Reset),
                (_, KeyCode::BackTab) => Some(TuiEvent::BackTab),
                (_, KeyCode::Tab) => Some(TuiEvent::Tab),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
