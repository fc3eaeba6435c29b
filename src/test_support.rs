//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiError, ProgramApi};
use crate::core::program::{Program, ProgramDraft, ProgramId};
use crate::core::state::App;

/// A no-op backend for tests that never touch the network.
pub struct NoopApi;

#[async_trait]
impl ProgramApi for NoopApi {
    async fn list(&self) -> Result<Vec<Program>, ApiError> {
        Ok(Vec::new())
    }

    async fn create(&self, draft: &ProgramDraft) -> Result<Program, ApiError> {
        Ok(draft.clone().with_id(1))
    }

    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Program, ApiError> {
        Ok(draft.clone().with_id(id))
    }

    async fn delete(&self, _id: ProgramId) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Creates a test App backed by a NoopApi.
pub fn test_app() -> App {
    App::new(Arc::new(NoopApi))
}

/// A record with fixed dates, for table and reducer tests.
pub fn test_program(id: ProgramId, desc: &str) -> Program {
    Program {
        program_id: id,
        program_desc: desc.to_string(),
        date_start: "2024-01-01".to_string(),
        date_end: "2024-02-01".to_string(),
        objective: "Objective".to_string(),
    }
}
