//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! ```text
//! key press ──► TuiEvent ──► Action ──► update() ──► Effect
//!                                          │            │
//!                                     state change   tokio::spawn(api call)
//!                                          │            │
//!                                       draw()      outcome Action ──► channel
//! ```
//!
//! Backend calls run on spawned tokio tasks; their outcomes come back over
//! an `mpsc` channel and are drained once per loop iteration. Requests in
//! flight are never aborted — the reducer's sequence numbers keep a slow
//! list response from clobbering a newer one.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::api::ProgramApi;
use crate::core::action::{Action, Effect, update};
use crate::core::program::{ProgramDraft, ProgramId};
use crate::core::state::{App, EditorMode};
use crate::tui::component::EventHandler;
use crate::tui::components::{EditorForm, ProgramTableState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long the error banner stays up before auto-dismissing.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// Which pane keyboard input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Browse the table. Enter loads a row into the editor.
    Table,
    /// Edit the form fields.
    Editor,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub table: ProgramTableState,
    pub editor: EditorForm,
    pub focus: Focus,
    /// Banner id and the instant it appeared, for the dismiss timer.
    banner_shown: Option<(u64, Instant)>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            table: ProgramTableState::new(),
            editor: EditorForm::new(),
            focus: Focus::Table,
            banner_shown: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run(api: Arc<dyn ProgramApi>) -> std::io::Result<()> {
    let mut app = App::new(api);
    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();

    // Channel for outcome actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut should_quit = false;
    let mut needs_redraw = true; // Force first frame

    // Populate the table straight away.
    dispatch(&mut app, &mut tui, &tx, &mut should_quit, Action::Refresh);

    while !should_quit {
        // Auto-dismiss the error banner after BANNER_TTL.
        match app.banner.as_ref().map(|b| b.id) {
            Some(id) => match tui.banner_shown {
                Some((seen_id, shown_at)) if seen_id == id => {
                    if shown_at.elapsed() >= BANNER_TTL {
                        dispatch(&mut app, &mut tui, &tx, &mut should_quit, Action::DismissBanner);
                        tui.banner_shown = None;
                        needs_redraw = true;
                    }
                }
                _ => tui.banner_shown = Some((id, Instant::now())),
            },
            None => tui.banner_shown = None,
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain all pending events before next draw
        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // The validation modal blocks everything; any key dismisses it.
            if app.alert.is_some() {
                app.alert = None;
                continue;
            }

            match tui.focus {
                Focus::Table => handle_table_event(&mut app, &mut tui, &tx, &mut should_quit, event),
                Focus::Editor => {
                    handle_editor_event(&mut app, &mut tui, &tx, &mut should_quit, event)
                }
            }
        }

        // Drain backend outcomes (list fetches, mutation results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            dispatch(&mut app, &mut tui, &tx, &mut should_quit, action);
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_table_event(
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
    event: TuiEvent,
) {
    match event {
        TuiEvent::Escape | TuiEvent::InputChar('q') => {
            dispatch(app, tui, tx, should_quit, Action::Quit);
        }
        TuiEvent::InputChar('r') => {
            dispatch(app, tui, tx, should_quit, Action::Refresh);
        }
        TuiEvent::InputChar('n') => {
            dispatch(app, tui, tx, should_quit, Action::ResetEditor);
            tui.focus = Focus::Editor;
        }
        TuiEvent::CursorUp => tui.table.select_up(),
        TuiEvent::CursorDown => tui.table.select_down(),
        // Row activation: the terminal analog of double-clicking a row.
        TuiEvent::Submit => {
            if let Some(program) = tui.table.selected(&app.programs).cloned() {
                tui.editor.load(&program);
                dispatch(app, tui, tx, should_quit, Action::OpenEditor(program));
                tui.focus = Focus::Editor;
            }
        }
        _ => {}
    }
}

fn handle_editor_event(
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
    event: TuiEvent,
) {
    match event {
        TuiEvent::Escape => tui.focus = Focus::Table,
        TuiEvent::Save => {
            let draft = tui.editor.draft();
            let action = match app.editor_mode {
                EditorMode::Create => Action::SubmitCreate(draft),
                EditorMode::Edit { id } => Action::SubmitUpdate(id, draft),
            };
            dispatch(app, tui, tx, should_quit, action);
        }
        TuiEvent::Delete => {
            dispatch(app, tui, tx, should_quit, Action::SubmitDelete);
        }
        TuiEvent::Reset => {
            dispatch(app, tui, tx, should_quit, Action::ResetEditor);
        }
        other => {
            let _ = tui.editor.handle_event(&other);
        }
    }
}

/// Run an action through the reducer, then execute whatever effect it asks
/// for. Mutation effects each spawn one background task; `ClearEditor`
/// touches the form buffers that live on this side of the core seam.
fn dispatch(
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
    action: Action,
) {
    let effect = update(app, action);
    match effect {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::ClearEditor => tui.editor.reset(),
        Effect::Refresh(seq) => spawn_list(app.api.clone(), seq, tx.clone()),
        Effect::Create(draft) => spawn_create(app.api.clone(), draft, tx.clone()),
        Effect::Update(id, draft) => spawn_update(app.api.clone(), id, draft, tx.clone()),
        Effect::Delete(id) => spawn_delete(app.api.clone(), id, tx.clone()),
    }
}

fn send_outcome(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send backend outcome: receiver dropped");
    }
}

fn spawn_list(api: Arc<dyn ProgramApi>, seq: u64, tx: mpsc::Sender<Action>) {
    info!("Spawning list fetch (seq {seq})");
    tokio::spawn(async move {
        let action = match api.list().await {
            Ok(programs) => Action::Loaded { seq, programs },
            Err(e) => Action::Failed(e),
        };
        send_outcome(&tx, action);
    });
}

fn spawn_create(api: Arc<dyn ProgramApi>, draft: ProgramDraft, tx: mpsc::Sender<Action>) {
    info!("Spawning create request");
    tokio::spawn(async move {
        let action = match api.create(&draft).await {
            Ok(program) => Action::Created(program),
            Err(e) => Action::Failed(e),
        };
        send_outcome(&tx, action);
    });
}

fn spawn_update(
    api: Arc<dyn ProgramApi>,
    id: ProgramId,
    draft: ProgramDraft,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning update request for #{id}");
    tokio::spawn(async move {
        let action = match api.update(id, &draft).await {
            Ok(program) => Action::Updated(program),
            Err(e) => Action::Failed(e),
        };
        send_outcome(&tx, action);
    });
}

fn spawn_delete(api: Arc<dyn ProgramApi>, id: ProgramId, tx: mpsc::Sender<Action>) {
    info!("Spawning delete request for #{id}");
    tokio::spawn(async move {
        let action = match api.delete(id).await {
            Ok(()) => Action::Deleted(id),
            Err(e) => Action::Failed(e),
        };
        send_outcome(&tx, action);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_program};

    fn harness() -> (App, TuiState, mpsc::Sender<Action>, mpsc::Receiver<Action>, bool) {
        let (tx, rx) = mpsc::channel();
        (test_app(), TuiState::new(), tx, rx, false)
    }

    #[test]
    fn test_enter_on_row_loads_editor_and_switches_focus() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        app.programs = vec![test_program(4, "Strength")];
        tui.table.sync(&app.programs);

        handle_table_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::Submit);

        assert_eq!(tui.focus, Focus::Editor);
        assert_eq!(app.editor_mode, EditorMode::Edit { id: 4 });
        assert_eq!(tui.editor.desc, "Strength");
    }

    #[test]
    fn test_enter_on_empty_table_is_a_no_op() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        handle_table_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::Submit);
        assert_eq!(tui.focus, Focus::Table);
        assert_eq!(app.editor_mode, EditorMode::Create);
    }

    #[test]
    fn test_n_opens_a_blank_editor() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        tui.editor.desc = "leftover".to_string();
        app.editor_mode = EditorMode::Edit { id: 1 };

        handle_table_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::InputChar('n'));

        assert_eq!(tui.focus, Focus::Editor);
        assert_eq!(app.editor_mode, EditorMode::Create);
        assert!(tui.editor.is_empty());
    }

    #[test]
    fn test_q_quits_from_table() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        handle_table_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::InputChar('q'));
        assert!(quit);
    }

    #[test]
    fn test_save_in_create_mode_validates_the_draft() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        // Blank form: validation must fail and raise the alert.
        handle_editor_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::Save);
        assert!(app.alert.is_some());
        assert!(!app.is_loading);
    }

    #[test]
    fn test_escape_returns_to_table() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        tui.focus = Focus::Editor;
        handle_editor_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Table);
    }

    #[test]
    fn test_reset_clears_the_form() {
        let (mut app, mut tui, tx, _rx, mut quit) = harness();
        tui.focus = Focus::Editor;
        tui.editor.desc = "half-typed".to_string();
        app.editor_mode = EditorMode::Edit { id: 2 };

        handle_editor_event(&mut app, &mut tui, &tx, &mut quit, TuiEvent::Reset);

        assert!(tui.editor.is_empty());
        assert_eq!(app.editor_mode, EditorMode::Create);
    }
}
