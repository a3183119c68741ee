use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::matcher::artist_match;
use crate::ports::library::{AddOutcome, LibraryTrack, MusicLibrary, Playlist, PlaylistLookup};
use crate::report::{RunOutcome, RunSummary};
use crate::song_list::SongQuery;

const PROGRESS_EVERY: usize = 25;
const NOTICE_TITLE: &str = "Import Complete";

/// A library track that was put into the destination playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedTrack {
    pub query: String,
    pub name: String,
    pub artist: String,
    pub outcome: AddOutcome,
}

/// Copies tracks already in the local library into a playlist.
pub struct LibraryImportService<L: MusicLibrary> {
    library: L,
    playlist_name: String,
}

impl<L: MusicLibrary> LibraryImportService<L> {
    pub fn new(library: L, playlist_name: String) -> Self {
        Self {
            library,
            playlist_name,
        }
    }

    /// Resolve the playlist, then process every song in order.
    ///
    /// Only a playlist failure is fatal; per-song failures are recorded as errors.
    pub fn run(&self, songs: &[SongQuery]) -> Result<RunOutcome<AddedTrack>> {
        let lookup = self
            .library
            .ensure_playlist(&self.playlist_name)
            .wrap_err("Failed to prepare the destination playlist")?;
        match &lookup {
            PlaylistLookup::Found(playlist) => println!("Using playlist: {}", playlist.name),
            PlaylistLookup::Created(playlist) => println!("Created playlist: {}", playlist.name),
        }
        let playlist = lookup.playlist();

        let total = songs.len();
        let mut summary = RunSummary::default();

        for (i, song) in songs.iter().enumerate() {
            if i % PROGRESS_EVERY == 0 {
                println!("Processing {}/{}...", i + 1, total);
            }

            match self.process_song(song, playlist) {
                Ok(Some(added)) => summary.record_added(added),
                Ok(None) => summary.record_not_found(&song.original),
                Err(err) => {
                    tracing::warn!("Failed to import {:?}: {:?}", song.original, err);
                    summary.record_error(&song.original, format!("{:#}", err));
                }
            }
        }

        Ok(RunOutcome {
            summary,
            processed: total,
            aborted: false,
        })
    }

    fn process_song(&self, song: &SongQuery, playlist: &Playlist) -> Result<Option<AddedTrack>> {
        // Title-only search; the artist disambiguates among the hits.
        let tracks = self.library.find_tracks(&song.title)?;
        let Some(track) = artist_match(&tracks, &song.artist) else {
            tracing::debug!(
                "No library track for {:?} among {} hits",
                song.original,
                tracks.len()
            );
            return Ok(None);
        };

        let outcome = self.library.add_track_to_playlist(track, playlist)?;
        if outcome == AddOutcome::AlreadyPresent {
            tracing::debug!("{:?} is already in {:?}", track.name, playlist.name);
        }

        Ok(Some(added_track(song, track, outcome)))
    }

    /// Print the tally and show the completion dialog.
    pub fn report(&self, outcome: &RunOutcome<AddedTrack>) -> Result<()> {
        let summary = &outcome.summary;

        println!("\n=== Results ===");
        println!("Added: {} songs", summary.added.len());
        println!("Not found: {} songs", summary.not_found.len());
        if !summary.errors.is_empty() {
            println!("Errors: {} songs", summary.errors.len());
        }

        if !summary.not_found.is_empty() {
            println!("\nSongs not found in library:");
            for song in &summary.not_found {
                println!("  - {}", song);
            }
        }

        if !summary.errors.is_empty() {
            println!("\nSongs that failed:");
            for failed in &summary.errors {
                println!("  - {} ({})", failed.query, failed.error);
            }
        }

        self.library
            .show_notice(NOTICE_TITLE, &notice_message(summary, &self.playlist_name))
    }
}

fn added_track(song: &SongQuery, track: &LibraryTrack, outcome: AddOutcome) -> AddedTrack {
    AddedTrack {
        query: song.original.clone(),
        name: track.name.clone(),
        artist: track.artist.clone(),
        outcome,
    }
}

fn notice_message(summary: &RunSummary<AddedTrack>, playlist_name: &str) -> String {
    let mut message = format!(
        "Added {} songs to playlist \"{}\".\n\n{} songs were not found in your library \
         and may need to be added from the Apple Music catalog first.",
        summary.added.len(),
        playlist_name,
        summary.not_found.len()
    );
    if !summary.errors.is_empty() {
        message.push_str(&format!(
            "\n\n{} songs failed with an error.",
            summary.errors.len()
        ));
    }
    message
}
