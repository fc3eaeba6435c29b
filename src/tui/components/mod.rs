pub mod editor;
pub mod program_table;
pub mod title_bar;

pub use editor::{EDITOR_HEIGHT, EditorEvent, EditorForm};
pub use program_table::{ProgramTable, ProgramTableState};
pub use title_bar::TitleBar;
