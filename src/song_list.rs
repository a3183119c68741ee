use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;

const SEPARATOR: &str = " - ";

/// One requested song, parsed from a `Title - Artist` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: String,
    /// The input line with surrounding whitespace removed, used when reporting.
    /// Both commands report this form, never the raw line.
    pub original: String,
}

impl SongQuery {
    /// Free-text search term combining title and artist.
    pub fn search_term(&self) -> String {
        format!("{} {}", self.title, self.artist).trim().to_string()
    }
}

/// Parse a single line.
///
/// The split happens at the first `" - "`, so artist names that contain the
/// separator stay intact. Lines without a separator become a title-only query.
pub fn parse_song_line(line: &str) -> SongQuery {
    let original = line.trim().to_string();
    match line.split_once(SEPARATOR) {
        Some((title, artist)) => SongQuery {
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
            original,
        },
        None => SongQuery {
            title: original.clone(),
            artist: String::new(),
            original,
        },
    }
}

/// Parse the contents of a song list, skipping blank lines.
pub fn parse_song_list(contents: &str) -> Vec<SongQuery> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_song_line)
        .collect()
}

pub fn read_song_file(path: &Path) -> Result<Vec<SongQuery>> {
    tracing::debug!("Reading song list from {}", path.display());
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read song list: {}", path.display()))?;
    let songs = parse_song_list(&contents);
    tracing::debug!("Parsed {} songs from {}", songs.len(), path.display());
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_artist() {
        let song = parse_song_line("Yesterday - The Beatles");
        assert_eq!(song.title, "Yesterday");
        assert_eq!(song.artist, "The Beatles");
        assert_eq!(song.original, "Yesterday - The Beatles");
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let song = parse_song_line("Love - Me - Kesha");
        assert_eq!(song.title, "Love");
        assert_eq!(song.artist, "Me - Kesha");
    }

    #[test]
    fn test_parse_without_separator() {
        let song = parse_song_line("  Bohemian Rhapsody  ");
        assert_eq!(song.title, "Bohemian Rhapsody");
        assert_eq!(song.artist, "");
        assert_eq!(song.original, "Bohemian Rhapsody");
    }

    #[test]
    fn test_parse_hyphen_without_spaces_is_not_a_separator() {
        let song = parse_song_line("Ob-La-Di, Ob-La-Da");
        assert_eq!(song.title, "Ob-La-Di, Ob-La-Da");
        assert_eq!(song.artist, "");
    }

    #[test]
    fn test_parse_trims_fields() {
        let song = parse_song_line("  Hey Jude   -   The Beatles ");
        assert_eq!(song.title, "Hey Jude");
        assert_eq!(song.artist, "The Beatles");
        assert_eq!(song.original, "Hey Jude   -   The Beatles");
    }

    #[test]
    fn test_parse_trailing_separator_gives_empty_artist() {
        let song = parse_song_line("Untitled - ");
        assert_eq!(song.title, "Untitled");
        assert_eq!(song.artist, "");
    }

    #[test]
    fn test_parse_song_list_skips_blank_lines() {
        let contents = "Yesterday - The Beatles\r\n\r\n   \nHello - Adele\n";
        let songs = parse_song_list(contents);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].artist, "The Beatles");
        assert_eq!(songs[1].title, "Hello");
        assert_eq!(songs[1].artist, "Adele");
    }

    #[test]
    fn test_search_term() {
        let song = parse_song_line("Hello - Adele");
        assert_eq!(song.search_term(), "Hello Adele");

        let title_only = parse_song_line("Hello");
        assert_eq!(title_only.search_term(), "Hello");
    }

    #[test]
    fn test_read_song_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.txt");
        std::fs::write(&path, "Yesterday - The Beatles\n\nHello - Adele\n").unwrap();

        let songs = read_song_file(&path).unwrap();
        assert_eq!(songs.len(), 2);
    }

    #[test]
    fn test_read_song_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = read_song_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read song list"));
    }
}
