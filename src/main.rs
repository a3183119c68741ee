mod apple_music_rs;
mod config;
mod logging;
mod matcher;
mod music_app;
mod ports;
mod report;
mod services;
mod song_list;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};

use crate::{
    apple_music_rs::{AppleMusicApi, AppleMusicCredentials},
    config::Config,
    logging::init_tracing,
    services::catalog::client::AppleMusicHttpAdapter,
    services::catalog::import::{CatalogImportService, CatalogImportSettings, report_catalog_run},
    services::library::client::MusicAppScriptingAdapter,
    services::library::import::LibraryImportService,
    song_list::read_song_file,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_IMPORT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter for stderr diagnostics, e.g. `debug` or `playlist_import=trace`
    #[arg(long, default_value = "warn", global = true, env = "LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the Apple Music catalog and add the best matches to your library
    Catalog {
        /// Song list, one `Title - Artist` per line
        #[arg(short, long)]
        songs: Option<PathBuf>,

        /// Where to write the JSON results
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Authorization header value from music.apple.com, without "Bearer "
        #[arg(long, env = "APPLE_BEARER_TOKEN", hide_env_values = true)]
        bearer_token: Option<String>,

        /// media-user-token header value from music.apple.com
        #[arg(long, env = "APPLE_MEDIA_USER_TOKEN", hide_env_values = true)]
        media_user_token: Option<String>,

        /// Only process the first N songs (default from config)
        #[arg(short, long, env = "LIMIT")]
        limit: Option<usize>,

        /// Process every song in the list, ignoring the limit
        #[arg(long)]
        all: bool,

        /// Print every search result considered for each song
        #[arg(short, long, env = "VERBOSE", value_parser = FalseyValueParser::new())]
        verbose: bool,
    },
    /// Add songs already in the local Music library to a playlist (macOS)
    Library {
        /// Song list, one `Title - Artist` per line
        #[arg(short, long)]
        songs: Option<PathBuf>,

        /// Destination playlist, created if missing
        #[arg(short, long)]
        playlist: Option<String>,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    tracing::debug!("Loading configuration");
    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load playlist-import config")?;

    match args.command {
        Commands::Catalog {
            songs,
            results,
            bearer_token,
            media_user_token,
            limit,
            all,
            verbose,
        } => {
            println!("Apple Music Catalog Search");
            println!("==========================\n");

            // Checked before anything touches the network.
            let credentials = match AppleMusicCredentials::new(bearer_token, media_user_token) {
                Ok(credentials) => credentials,
                Err(missing) => {
                    eprintln!("{}", missing);
                    eprintln!();
                    eprintln!("Example:");
                    eprintln!(
                        "  APPLE_BEARER_TOKEN=\"eyJ...\" APPLE_MEDIA_USER_TOKEN=\"An6...\" playlist-import catalog"
                    );
                    std::process::exit(1);
                }
            };

            let songs_path = songs.unwrap_or_else(|| config.songs_path());
            let results_path = results.unwrap_or_else(|| config.results_path());

            println!("Reading songs from {}...", songs_path.display());
            let songs = read_song_file(&songs_path)?;
            println!("Found {} songs to search\n", songs.len());

            let limit = if all {
                songs.len()
            } else {
                limit.unwrap_or(config.catalog.default_limit)
            };
            let songs = &songs[..limit.min(songs.len())];
            println!(
                "Processing first {} songs (set LIMIT or pass --all to change)\n",
                songs.len()
            );

            let api = AppleMusicApi::from_config(&config.catalog)?;
            let service = CatalogImportService::new(
                AppleMusicHttpAdapter::new(api, credentials),
                CatalogImportSettings {
                    delay: Duration::from_millis(config.catalog.delay_ms),
                    verbose,
                },
            );

            let outcome = service.run(songs).await;
            report_catalog_run(&outcome, &results_path)?;
            tracing::info!(
                processed = outcome.processed,
                aborted = outcome.aborted,
                "Catalog import finished"
            );
        }
        Commands::Library { songs, playlist } => {
            let songs_path = songs.unwrap_or_else(|| config.songs_path());
            let playlist_name = playlist.unwrap_or_else(|| config.library.playlist_name.clone());

            let library = MusicAppScriptingAdapter::connect()?;

            println!("Reading songs file...");
            let songs = read_song_file(&songs_path)?;
            println!("Found {} songs to process", songs.len());

            let service = LibraryImportService::new(library, playlist_name);
            let outcome = service.run(&songs)?;
            service.report(&outcome)?;
            tracing::info!(processed = outcome.processed, "Library import finished");
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                let path = Config::create_default()?;
                println!("{}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
