#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! The conversational session controller and the export service.
//!
//! A [`SessionController`] owns one [`Session`] and drives each send cycle as
//! two discrete phases:
//! - `begin_*` gates the input, appends the user message and marks the
//!   session busy
//! - `resolve` appends the assistant outcome and returns the session to idle
//!
//! The async `submit` / `quick_query` helpers run both phases around a single
//! transport exchange. Observers follow the log through [`SessionEvent`]s.

mod controller;
mod events;
pub mod export;
mod session;

#[cfg(test)]
mod testing;

pub use controller::{PendingRequest, Rejected, Resolution, SessionController, SubmitOutcome};
pub use events::SessionEvent;
pub use export::{ExportArtifact, ExportError, export_assistant_messages};
pub use session::{Session, SessionState};
