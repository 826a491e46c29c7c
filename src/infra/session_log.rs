// ============================================================
// Layer 6 — Session Logger
// ============================================================
// Writes one inference session's transcript to a timestamped
// text file in the history directory.
//
// File naming convention:
//   vqa_history/
//     session_20260807_141503.txt   ← one file per invocation
//     session_20260807_152210.txt
//     ...
//
// Each run gets a fresh timestamp, so session files are never
// appended to or overwritten across runs — the history directory
// is an immutable record of past sessions.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use chrono::Local;
use std::{fs, path::PathBuf};

use crate::domain::transcript::SessionTranscript;

/// Writes session transcripts into a history directory.
pub struct SessionLogger {
    dir: PathBuf,
}

impl SessionLogger {
    /// Create a new SessionLogger.
    /// Creates the history directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create history directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write the transcript to a new session_<timestamp>.txt file
    /// and return its path.
    pub fn save(&self, transcript: &SessionTranscript) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("session_{timestamp}.txt"));

        fs::write(&path, transcript.render())
            .with_context(|| format!("Cannot write session log to '{}'", path.display()))?;

        tracing::debug!("Session log saved to '{}'", path.display());
        Ok(path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_rendered_transcript() {
        let dir    = TempDir::new().unwrap();
        let logger = SessionLogger::new(dir.path().join("history")).unwrap();

        let mut transcript = SessionTranscript::new("cat.jpg");
        transcript.record("Is it fluffy?", "yes", 0.8);

        let path = logger.save(&transcript).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("session_"));
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, transcript.render());
    }

    #[test]
    fn test_new_creates_history_directory() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("a/b/history");
        SessionLogger::new(&history).unwrap();
        assert!(history.is_dir());
    }
}
