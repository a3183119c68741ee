//! Drives the desktop Music application through JavaScript for Automation.
//!
//! Each operation is a small JXA script run with `osascript -l JavaScript`.
//! Arguments go through `argv` so user input is never spliced into script
//! source, and every script returns JSON on stdout.

use std::process::Command;

use serde::de::DeserializeOwned;

use crate::ports::library::{AddOutcome, LibraryTrack, Playlist};

mod scripts;

const OSASCRIPT: &str = "osascript";

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("osascript not found in PATH. The local library import only runs on macOS.")]
    OsascriptNotFound,
    #[error("Failed to start osascript: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Script failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Unexpected script output {output:?}: {source}")]
    Output {
        output: String,
        source: serde_json::Error,
    },
}

pub fn ensure_osascript() -> Result<(), ScriptError> {
    if which::which(OSASCRIPT).is_err() {
        return Err(ScriptError::OsascriptNotFound);
    }
    Ok(())
}

fn run_jxa<T: DeserializeOwned>(script: &str, args: &[&str]) -> Result<T, ScriptError> {
    let output = Command::new(OSASCRIPT)
        .args(["-l", "JavaScript", "-e", script])
        .args(args)
        .output()?;

    if !output.status.success() {
        return Err(ScriptError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_output(&String::from_utf8_lossy(&output.stdout))
}

fn parse_output<T: DeserializeOwned>(stdout: &str) -> Result<T, ScriptError> {
    let trimmed = stdout.trim();
    serde_json::from_str(trimmed).map_err(|source| ScriptError::Output {
        output: trimmed.to_string(),
        source,
    })
}

pub fn activate() -> Result<(), ScriptError> {
    run_jxa::<serde_json::Value>(scripts::ACTIVATE, &[]).map(|_| ())
}

pub fn search_library(term: &str) -> Result<Vec<LibraryTrack>, ScriptError> {
    run_jxa(scripts::SEARCH_LIBRARY, &[term])
}

pub fn find_playlist(name: &str) -> Result<Option<Playlist>, ScriptError> {
    run_jxa(scripts::FIND_PLAYLIST, &[name])
}

pub fn create_playlist(name: &str) -> Result<Playlist, ScriptError> {
    run_jxa(scripts::CREATE_PLAYLIST, &[name])
}

pub fn add_track(track_id: &str, playlist_id: &str) -> Result<AddOutcome, ScriptError> {
    run_jxa(scripts::ADD_TRACK, &[track_id, playlist_id])
}

pub fn display_dialog(title: &str, message: &str) -> Result<(), ScriptError> {
    run_jxa::<serde_json::Value>(scripts::DISPLAY_DIALOG, &[title, message]).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks() {
        let stdout = r#"[{"persistent_id":"ABC123","name":"Hello","artist":"Adele"}]
"#;
        let tracks: Vec<LibraryTrack> = parse_output(stdout).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].persistent_id, "ABC123");
        assert_eq!(tracks[0].artist, "Adele");
    }

    #[test]
    fn test_parse_missing_playlist() {
        let playlist: Option<Playlist> = parse_output("null\n").unwrap();
        assert!(playlist.is_none());
    }

    #[test]
    fn test_parse_add_outcome() {
        let added: AddOutcome = parse_output("\"added\"").unwrap();
        assert_eq!(added, AddOutcome::Added);
        let present: AddOutcome = parse_output("\"alreadyPresent\"").unwrap();
        assert_eq!(present, AddOutcome::AlreadyPresent);
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_output::<Vec<LibraryTrack>>("execution error").unwrap_err();
        assert!(matches!(err, ScriptError::Output { .. }));
        assert!(err.to_string().contains("execution error"));
    }
}
