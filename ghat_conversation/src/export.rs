//! Export of assistant replies to a plain-text artifact.

use chrono::{NaiveDate, Utc};
use ghat_core::Message;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There are no messages from the assistant to save.")]
    NoContent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A text file ready to be written somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub contents: String,
}

impl ExportArtifact {
    /// Write the artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.contents.as_bytes())?;
        info!("Saved {} bytes to {}", self.contents.len(), path.display());
        Ok(path)
    }
}

/// Separator placed between two exported messages.
#[must_use]
pub fn separator() -> String {
    format!("\n\n{}\n\n", "-".repeat(RULE_WIDTH))
}

/// `chatgpt-saved-YYYY-MM-DD.txt`
#[must_use]
pub fn filename_for(date: NaiveDate) -> String {
    format!("chatgpt-saved-{}.txt", date.format("%Y-%m-%d"))
}

/// Export assistant messages, stamped with today's UTC date.
pub fn export_assistant_messages(log: &[Message]) -> Result<ExportArtifact, ExportError> {
    export_assistant_messages_on(log, Utc::now().date_naive())
}

pub fn export_assistant_messages_on(
    log: &[Message],
    date: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let bodies: Vec<&str> = log
        .iter()
        .filter(|m| m.is_assistant())
        .map(Message::text)
        .collect();

    if bodies.is_empty() {
        return Err(ExportError::NoContent);
    }

    Ok(ExportArtifact {
        filename: filename_for(date),
        contents: bodies.join(separator().as_str()),
    })
}
