pub const ACTIVATE: &str = r#"
function run(argv) {
    Application('Music').activate();
    return 'null';
}
"#;

pub const SEARCH_LIBRARY: &str = r#"
function run(argv) {
    const music = Application('Music');
    const found = music.search(music.libraryPlaylists[0], { for: argv[0] }) || [];
    const tracks = [];
    for (const track of found) {
        tracks.push({
            persistent_id: track.persistentID(),
            name: track.name() || '',
            artist: track.artist() || ''
        });
    }
    return JSON.stringify(tracks);
}
"#;

pub const FIND_PLAYLIST: &str = r#"
function run(argv) {
    const music = Application('Music');
    const matches = music.userPlaylists.whose({ name: argv[0] })();
    if (matches.length === 0) {
        return 'null';
    }
    return JSON.stringify({ persistent_id: matches[0].persistentID(), name: matches[0].name() });
}
"#;

pub const CREATE_PLAYLIST: &str = r#"
function run(argv) {
    const music = Application('Music');
    const playlist = music.make({ new: 'playlist', withProperties: { name: argv[0] } });
    return JSON.stringify({ persistent_id: playlist.persistentID(), name: playlist.name() });
}
"#;

pub const ADD_TRACK: &str = r#"
function run(argv) {
    const music = Application('Music');
    const playlist = music.userPlaylists.whose({ persistentID: argv[1] })()[0];
    if (playlist.tracks.whose({ persistentID: argv[0] })().length > 0) {
        return JSON.stringify('alreadyPresent');
    }
    const track = music.libraryPlaylists[0].tracks.whose({ persistentID: argv[0] })()[0];
    music.duplicate(track, { to: playlist });
    return JSON.stringify('added');
}
"#;

pub const DISPLAY_DIALOG: &str = r#"
function run(argv) {
    const app = Application.currentApplication();
    app.includeStandardAdditions = true;
    app.displayDialog(argv[1], { buttons: ['OK'], defaultButton: 'OK', withTitle: argv[0] });
    return 'null';
}
"#;
