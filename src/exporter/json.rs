// file: src/exporter/json.rs
// description: json export of chat session transcripts

use crate::chat::Session;
use crate::error::Result;
use crate::models::ConversationTurn;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct TranscriptExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedTranscript<'a> {
    pub exported_at: String,
    pub session_id: String,
    pub turn_count: usize,
    pub turns: &'a [ConversationTurn],
}

impl TranscriptExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, session: &Session, pretty: bool) -> Result<usize> {
        let transcript = ExportedTranscript {
            exported_at: Utc::now().to_rfc3339(),
            session_id: session.id().to_string(),
            turn_count: session.history().len(),
            turns: session.history(),
        };

        let json = if pretty {
            serde_json::to_string_pretty(&transcript)?
        } else {
            serde_json::to_string(&transcript)?
        };

        fs::write(&self.output_path, json)?;

        info!(
            "Exported {} turns to {}",
            transcript.turn_count,
            self.output_path.display()
        );
        Ok(transcript.turn_count)
    }
}
