use color_eyre::eyre::Result;

use crate::matcher::Candidate;

/// A track in the local music library.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LibraryTrack {
    pub persistent_id: String,
    pub name: String,
    pub artist: String,
}

impl Candidate for LibraryTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn artist(&self) -> &str {
        &self.artist
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Playlist {
    pub persistent_id: String,
    pub name: String,
}

/// Result of looking up the destination playlist by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLookup {
    Found(Playlist),
    Created(Playlist),
}

impl PlaylistLookup {
    pub fn playlist(&self) -> &Playlist {
        match self {
            Self::Found(playlist) | Self::Created(playlist) => playlist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOutcome {
    Added,
    /// The playlist already held the track; nothing was changed.
    AlreadyPresent,
}

/// Port trait wrapping the desktop music application's scripting interface.
///
/// Calls block until the application answers. Implementations live in
/// `services::library::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
pub trait MusicLibrary {
    fn find_tracks(&self, term: &str) -> Result<Vec<LibraryTrack>>;

    /// Look the playlist up by exact name, creating it when absent.
    fn ensure_playlist(&self, name: &str) -> Result<PlaylistLookup>;

    fn add_track_to_playlist(&self, track: &LibraryTrack, playlist: &Playlist)
    -> Result<AddOutcome>;

    /// Show a modal dialog and wait for the user to dismiss it.
    fn show_notice(&self, title: &str, message: &str) -> Result<()>;
}
