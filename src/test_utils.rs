use crate::ports::catalog::CatalogSong;
use crate::ports::library::{LibraryTrack, Playlist};

pub fn catalog_song(id: &str, name: &str, artist: &str) -> CatalogSong {
    CatalogSong {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: "Album".to_string(),
        url: format!("https://music.apple.com/song/{}", id),
    }
}

pub fn library_track(persistent_id: &str, name: &str, artist: &str) -> LibraryTrack {
    LibraryTrack {
        persistent_id: persistent_id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

pub fn playlist(name: &str) -> Playlist {
    Playlist {
        persistent_id: "PL0001".to_string(),
        name: name.to_string(),
    }
}
