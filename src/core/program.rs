//! # Program Records
//!
//! The domain entity: a training program with a description, a date range,
//! and a free-text objective. Field names match the backend's JSON wire
//! format exactly.
//!
//! Dates travel as `YYYY-MM-DD` strings. The backend owns real date
//! semantics; the client only checks lexical ordering, which for this
//! format is equivalent to chronological ordering.

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
pub type ProgramId = i64;

/// A persisted program record, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Program {
    pub program_id: ProgramId,
    pub program_desc: String,
    pub date_start: String,
    pub date_end: String,
    pub objective: String,
}

/// An unsaved program: what the editor produces and what `create` sends.
/// The backend assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramDraft {
    pub program_desc: String,
    pub date_start: String,
    pub date_end: String,
    pub objective: String,
}

impl ProgramDraft {
    /// Attach a server-assigned id, producing a full record.
    /// Used to build PUT bodies, which carry the id.
    pub fn with_id(self, id: ProgramId) -> Program {
        Program {
            program_id: id,
            program_desc: self.program_desc,
            date_start: self.date_start,
            date_end: self.date_end,
            objective: self.objective,
        }
    }
}

impl From<Program> for ProgramDraft {
    fn from(p: Program) -> Self {
        Self {
            program_desc: p.program_desc,
            date_start: p.date_start,
            date_end: p.date_end,
            objective: p.objective,
        }
    }
}

/// The only business rule enforced client-side: the description must be
/// non-empty and the start date must precede the end date.
///
/// Comparison is lexical, which matches chronological order for
/// `YYYY-MM-DD` strings. Everything else is the backend's problem.
pub fn validate(program_desc: &str, date_start: &str, date_end: &str) -> bool {
    !program_desc.is_empty() && date_start < date_end
}
