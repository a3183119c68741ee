use color_eyre::eyre::{Result, WrapErr};

use crate::music_app;
use crate::ports::library::{AddOutcome, LibraryTrack, MusicLibrary, Playlist, PlaylistLookup};

pub struct MusicAppScriptingAdapter;

impl MusicAppScriptingAdapter {
    /// Check that the scripting bridge is available and bring Music to the front.
    pub fn connect() -> Result<Self> {
        music_app::ensure_osascript()?;
        music_app::activate().wrap_err("Failed to activate the Music app")?;
        Ok(Self)
    }
}

impl MusicLibrary for MusicAppScriptingAdapter {
    fn find_tracks(&self, term: &str) -> Result<Vec<LibraryTrack>> {
        music_app::search_library(term)
            .wrap_err_with(|| format!("Failed to search library for {:?}", term))
    }

    fn ensure_playlist(&self, name: &str) -> Result<PlaylistLookup> {
        if let Some(playlist) = music_app::find_playlist(name)
            .wrap_err_with(|| format!("Failed to look up playlist {:?}", name))?
        {
            return Ok(PlaylistLookup::Found(playlist));
        }

        let playlist = music_app::create_playlist(name)
            .wrap_err_with(|| format!("Failed to create playlist {:?}", name))?;
        Ok(PlaylistLookup::Created(playlist))
    }

    fn add_track_to_playlist(
        &self,
        track: &LibraryTrack,
        playlist: &Playlist,
    ) -> Result<AddOutcome> {
        music_app::add_track(&track.persistent_id, &playlist.persistent_id).wrap_err_with(|| {
            format!(
                "Failed to add {:?} to playlist {:?}",
                track.name, playlist.name
            )
        })
    }

    fn show_notice(&self, title: &str, message: &str) -> Result<()> {
        music_app::display_dialog(title, message).wrap_err("Failed to show dialog")
    }
}
