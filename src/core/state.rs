//! # Application State
//!
//! Core business state for Regimen. This module contains domain state only -
//! no TUI-specific types. Presentation state (field buffers, cursor, scroll)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn ProgramApi>      // backend client
//! ├── programs: Vec<Program>        // last fetched list (no local cache)
//! ├── editor_mode: Create | Edit    // explicit create-vs-update state
//! ├── is_loading: bool              // a request is in flight
//! ├── status_message: String        // title bar text
//! ├── banner: Option<Banner>        // transient error banner
//! ├── alert: Option<String>         // blocking validation modal
//! └── list_seq: u64                 // sequence number of the newest fetch
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::ProgramApi;
use crate::core::program::{Program, ProgramId};
use std::sync::Arc;

/// Which of the two editor modes the form is in. A tagged state, so
/// create-vs-update never has to be sensed from an empty id field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Blank form; submit issues a create.
    #[default]
    Create,
    /// Form loaded from an existing record; submit issues an update,
    /// and delete targets this id.
    Edit { id: ProgramId },
}

/// A transient error banner. The `id` increments with every new banner so
/// the TUI can restart its 3-second dismiss timer even when two identical
/// messages arrive back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub id: u64,
}

pub struct App {
    pub api: Arc<dyn ProgramApi>,
    /// The authoritative list, replaced wholesale by every successful fetch.
    pub programs: Vec<Program>,
    pub editor_mode: EditorMode,
    pub is_loading: bool,
    pub status_message: String,
    pub banner: Option<Banner>,
    /// Validation failure message. While set, the TUI blocks all input
    /// behind a modal until the user dismisses it.
    pub alert: Option<String>,
    /// Sequence number of the most recently issued list fetch. A `Loaded`
    /// action carrying an older number is stale and gets dropped.
    pub list_seq: u64,
    next_banner_id: u64,
}

impl App {
    pub fn new(api: Arc<dyn ProgramApi>) -> Self {
        Self {
            api,
            programs: Vec::new(),
            editor_mode: EditorMode::Create,
            is_loading: false,
            status_message: String::from("Welcome to Regimen!"),
            banner: None,
            alert: None,
            list_seq: 0,
            next_banner_id: 0,
        }
    }

    /// Replace the current banner, bumping the id so the TUI's dismiss
    /// timer restarts.
    pub fn show_banner(&mut self, message: String) {
        self.next_banner_id += 1;
        self.banner = Some(Banner {
            message,
            id: self.next_banner_id,
        });
    }

    /// Bump and return the sequence number for a new list fetch.
    pub fn next_list_seq(&mut self) -> u64 {
        self.list_seq += 1;
        self.list_seq
    }
}
