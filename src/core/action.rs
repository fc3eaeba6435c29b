//! # Actions
//!
//! Everything that can happen in Regimen becomes an `Action`.
//! User hits Ctrl+S on a blank form? That's `Action::SubmitCreate`.
//! The backend answers a list fetch? That's `Action::Loaded`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing the I/O the
//! runtime should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed an action, assert on the state
//! and the returned effect. The TUI layer is the only place effects are
//! actually executed (by spawning tokio tasks that send outcome actions
//! back over the channel).

use log::{debug, error, info};

use crate::api::ApiError;
use crate::core::program::{Program, ProgramDraft, ProgramId, validate};
use crate::core::state::{App, EditorMode};

/// Message shown when create/update input fails validation.
pub const INVALID_INPUT_ALERT: &str = "Problem with program input";

/// User intents and backend outcomes, unified into one event stream.
#[derive(Debug)]
pub enum Action {
    // -- user intents ------------------------------------------------------
    /// Fetch the full program list from the backend.
    Refresh,
    /// Submit the editor's fields as a new record.
    SubmitCreate(ProgramDraft),
    /// Submit the editor's fields as a full-record update of `id`.
    SubmitUpdate(ProgramId, ProgramDraft),
    /// Delete the record currently loaded in the editor.
    SubmitDelete,
    /// Load an existing record into the editor (row activation).
    OpenEditor(Program),
    /// Clear the editor back to create mode.
    ResetEditor,
    /// Hide the error banner (dispatched by the TUI's 3-second timer).
    DismissBanner,
    Quit,

    // -- backend outcomes --------------------------------------------------
    /// A list fetch completed. `seq` identifies which fetch; stale
    /// sequences are discarded.
    Loaded {
        seq: u64,
        programs: Vec<Program>,
    },
    Created(Program),
    Updated(Program),
    Deleted(ProgramId),
    Failed(ApiError),
}

/// I/O the runtime must perform after an `update()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue a GET of the full list, tagged with this sequence number.
    Refresh(u64),
    Create(ProgramDraft),
    Update(ProgramId, ProgramDraft),
    Delete(ProgramId),
    /// Clear the editor form fields and focus the description field.
    /// The field buffers live in the TUI layer, so this crosses the seam
    /// as an effect rather than a state mutation.
    ClearEditor,
    Quit,
}

/// The reducer: applies `action` to `app` and says what I/O to do next.
pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Refresh => {
            app.is_loading = true;
            Effect::Refresh(app.next_list_seq())
        }

        Action::SubmitCreate(draft) => {
            if !validate(&draft.program_desc, &draft.date_start, &draft.date_end) {
                app.alert = Some(INVALID_INPUT_ALERT.to_string());
                return Effect::None;
            }
            app.is_loading = true;
            Effect::Create(draft)
        }

        Action::SubmitUpdate(id, draft) => {
            if !validate(&draft.program_desc, &draft.date_start, &draft.date_end) {
                app.alert = Some(INVALID_INPUT_ALERT.to_string());
                return Effect::None;
            }
            app.is_loading = true;
            Effect::Update(id, draft)
        }

        Action::SubmitDelete => {
            // Delete needs an id, nothing more. Field validation does not
            // apply to a delete.
            match app.editor_mode {
                EditorMode::Edit { id } => {
                    app.is_loading = true;
                    Effect::Delete(id)
                }
                EditorMode::Create => {
                    app.alert = Some("No program selected to delete".to_string());
                    Effect::None
                }
            }
        }

        Action::OpenEditor(program) => {
            app.editor_mode = EditorMode::Edit {
                id: program.program_id,
            };
            app.status_message = format!("Editing program #{}", program.program_id);
            Effect::None
        }

        Action::ResetEditor => {
            app.editor_mode = EditorMode::Create;
            app.status_message = String::from("New program");
            Effect::ClearEditor
        }

        Action::DismissBanner => {
            app.banner = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,

        Action::Loaded { seq, programs } => {
            if seq < app.list_seq {
                // A newer fetch is already in flight; this response lost
                // the race and must not clobber the table.
                debug!("dropping stale list response (seq {} < {})", seq, app.list_seq);
                return Effect::None;
            }
            info!("loaded {} programs", programs.len());
            app.programs = programs;
            app.is_loading = false;
            app.editor_mode = EditorMode::Create;
            app.status_message = format!("{} programs", app.programs.len());
            Effect::ClearEditor
        }

        // Every successful mutation resyncs the whole list from the server.
        // No optimistic updates, no diffing.
        Action::Created(program) => {
            info!("created program #{}", program.program_id);
            app.status_message = format!("Created \"{}\"", program.program_desc);
            Effect::Refresh(app.next_list_seq())
        }

        Action::Updated(program) => {
            info!("updated program #{}", program.program_id);
            app.status_message = format!("Updated \"{}\"", program.program_desc);
            Effect::Refresh(app.next_list_seq())
        }

        Action::Deleted(id) => {
            info!("deleted program #{}", id);
            app.status_message = format!("Deleted program #{}", id);
            Effect::Refresh(app.next_list_seq())
        }

        Action::Failed(err) => {
            let message = err.to_string();
            error!("request failed: {}", message);
            app.is_loading = false;
            // Table state is deliberately left alone: a failed mutation
            // leaves the list unresynced until the user acts again.
            app.show_banner(message);
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_program};

    fn valid_draft() -> ProgramDraft {
        ProgramDraft {
            program_desc: "Strength".to_string(),
            date_start: "2024-01-01".to_string(),
            date_end: "2024-02-01".to_string(),
            objective: "Base building".to_string(),
        }
    }

    #[test]
    fn test_refresh_increments_seq_and_sets_loading() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Refresh);
        assert_eq!(effect, Effect::Refresh(1));
        assert!(app.is_loading);
    }

    #[test]
    fn test_submit_create_valid_issues_create() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitCreate(valid_draft()));
        assert_eq!(effect, Effect::Create(valid_draft()));
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_submit_create_invalid_alerts_without_network() {
        let mut app = test_app();
        let mut draft = valid_draft();
        draft.program_desc.clear();
        let effect = update(&mut app, Action::SubmitCreate(draft));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.alert.as_deref(), Some(INVALID_INPUT_ALERT));
        assert!(!app.is_loading);
    }

    #[test]
    fn test_submit_update_invalid_date_order_alerts() {
        let mut app = test_app();
        let mut draft = valid_draft();
        draft.date_start = "2024-02-01".to_string();
        draft.date_end = "2024-01-01".to_string();
        let effect = update(&mut app, Action::SubmitUpdate(3, draft));
        assert_eq!(effect, Effect::None);
        assert!(app.alert.is_some());
    }

    #[test]
    fn test_submit_delete_requires_edit_mode() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitDelete);
        assert_eq!(effect, Effect::None);
        assert!(app.alert.is_some());

        app.alert = None;
        app.editor_mode = EditorMode::Edit { id: 9 };
        let effect = update(&mut app, Action::SubmitDelete);
        assert_eq!(effect, Effect::Delete(9));
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_each_mutation_success_triggers_exactly_one_refresh() {
        let mut app = test_app();
        let p = test_program(1, "A");

        // Repeated successes each trigger one resync, never more.
        assert_eq!(update(&mut app, Action::Created(p.clone())), Effect::Refresh(1));
        assert_eq!(update(&mut app, Action::Updated(p.clone())), Effect::Refresh(2));
        assert_eq!(update(&mut app, Action::Deleted(1)), Effect::Refresh(3));
        assert_eq!(update(&mut app, Action::Created(p)), Effect::Refresh(4));
    }

    #[test]
    fn test_loaded_replaces_table_and_resets_editor() {
        let mut app = test_app();
        app.editor_mode = EditorMode::Edit { id: 2 };
        let seq = app.next_list_seq();

        let effect = update(
            &mut app,
            Action::Loaded {
                seq,
                programs: vec![test_program(1, "A"), test_program(2, "B")],
            },
        );
        assert_eq!(effect, Effect::ClearEditor);
        assert_eq!(app.programs.len(), 2);
        assert_eq!(app.editor_mode, EditorMode::Create);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_stale_loaded_is_dropped() {
        let mut app = test_app();
        let stale = app.next_list_seq();
        let current = app.next_list_seq();

        // The slow, older fetch lands after a newer one was issued.
        let effect = update(
            &mut app,
            Action::Loaded {
                seq: stale,
                programs: vec![test_program(1, "old")],
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.programs.is_empty());

        let effect = update(
            &mut app,
            Action::Loaded {
                seq: current,
                programs: vec![test_program(2, "new")],
            },
        );
        assert_eq!(effect, Effect::ClearEditor);
        assert_eq!(app.programs[0].program_desc, "new");
    }

    #[test]
    fn test_failure_shows_banner_and_leaves_table_alone() {
        let mut app = test_app();
        app.programs = vec![test_program(1, "A")];
        app.is_loading = true;

        let effect = update(
            &mut app,
            Action::Failed(ApiError::Api {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                detail: "db unavailable".to_string(),
            }),
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert_eq!(app.programs.len(), 1);

        let banner = app.banner.as_ref().unwrap();
        assert!(banner.message.contains("Internal Server Error"));
        assert!(banner.message.contains("db unavailable"));
    }

    #[test]
    fn test_open_editor_switches_to_edit_mode() {
        let mut app = test_app();
        let effect = update(&mut app, Action::OpenEditor(test_program(5, "A")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.editor_mode, EditorMode::Edit { id: 5 });
    }

    #[test]
    fn test_reset_editor_returns_to_create_mode() {
        let mut app = test_app();
        app.editor_mode = EditorMode::Edit { id: 5 };
        let effect = update(&mut app, Action::ResetEditor);
        assert_eq!(effect, Effect::ClearEditor);
        assert_eq!(app.editor_mode, EditorMode::Create);
    }

    #[test]
    fn test_dismiss_banner_clears_it() {
        let mut app = test_app();
        app.show_banner("oops".to_string());
        let effect = update(&mut app, Action::DismissBanner);
        assert_eq!(effect, Effect::None);
        assert!(app.banner.is_none());
    }
}
