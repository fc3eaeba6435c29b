//! # Core Application Logic
//!
//! This module contains Regimen's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │    API     │
//!         │  Adapter   │                  │  (reqwest) │
//!         │ (ratatui)  │                  │            │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`program`]: The `Program` record and the `validate()` business rule
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`config`]: Settings resolution (defaults → file → env → CLI)

pub mod action;
pub mod config;
pub mod program;
pub mod state;
