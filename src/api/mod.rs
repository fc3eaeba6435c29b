//! # Backend API Seam
//!
//! The data-access layer: four CRUD operations against the program
//! collection, behind a trait so the TUI and the reducer can be tested
//! without a live server.
//!
//! Callers never block on these; the TUI spawns one tokio task per
//! operation and the outcome comes back as an `Action` over the event
//! channel. Requests in flight cannot be cancelled — stale list responses
//! are filtered by sequence number in the reducer instead.

mod client;

pub use client::RestClient;

use std::fmt;

use async_trait::async_trait;

use crate::core::program::{Program, ProgramDraft, ProgramId};

/// Errors that can occur while talking to the backend.
/// No retry logic anywhere: every failure is terminal for its action and
/// surfaces as one error banner.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The backend answered with a non-2xx status. `detail` is the
    /// server's JSON `detail` field when present, else the raw body.
    Api {
        status: u16,
        status_text: String,
        detail: String,
    },
    /// A 2xx response whose body couldn't be decoded.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error - {msg}"),
            ApiError::Api {
                status,
                status_text,
                detail,
            } => write!(f, "{status} {status_text} - {detail}"),
            ApiError::Parse(msg) => write!(f, "parse error - {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The four CRUD operations the backend exposes for programs.
#[async_trait]
pub trait ProgramApi: Send + Sync {
    /// GET the complete program list.
    async fn list(&self) -> Result<Vec<Program>, ApiError>;

    /// POST a new program. The backend assigns and returns the id.
    async fn create(&self, draft: &ProgramDraft) -> Result<Program, ApiError>;

    /// PUT a full-record update of `id`.
    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Program, ApiError>;

    /// DELETE the program with `id`. The response body is ignored.
    async fn delete(&self, id: ProgramId) -> Result<(), ApiError>;
}
