use std::io::Write;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::Result;
use serde::Serialize;

use crate::matcher::best_match;
use crate::ports::catalog::{CatalogClient, CatalogError, CatalogSong};
use crate::report::{RunOutcome, RunSummary};
use crate::song_list::SongQuery;

/// A song that was found in the catalog and added to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedSong {
    pub query: String,
    #[serde(rename = "match")]
    pub matched: CatalogSong,
}

enum SongOutcome {
    Added(CatalogSong),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct CatalogImportSettings {
    /// Pause between consecutive records
    pub delay: Duration,
    /// Print every candidate the search returned
    pub verbose: bool,
}

/// Searches the catalog for each song and adds the best match to the library,
/// one record at a time.
pub struct CatalogImportService<C: CatalogClient> {
    client: C,
    settings: CatalogImportSettings,
}

impl<C: CatalogClient> CatalogImportService<C> {
    pub fn new(client: C, settings: CatalogImportSettings) -> Self {
        Self { client, settings }
    }

    /// Process `songs` in order. Stops early if the catalog rejects the credentials;
    /// the rejected record is reported under errors.
    pub async fn run(&self, songs: &[SongQuery]) -> RunOutcome<AddedSong> {
        let total = songs.len();
        let mut summary = RunSummary::default();
        let mut processed = 0;
        let mut aborted = false;

        for (i, song) in songs.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.settings.delay).await;
            }
            processed += 1;

            print!("[{}/{}] Searching: {}... ", i + 1, total, song.original);
            let _ = std::io::stdout().flush();

            match self.process_song(song).await {
                Ok(SongOutcome::Added(matched)) => {
                    println!("Added: {} by {}", matched.name, matched.artist);
                    summary.record_added(AddedSong {
                        query: song.original.clone(),
                        matched,
                    });
                }
                Ok(SongOutcome::NotFound) => {
                    println!("Not found");
                    summary.record_not_found(&song.original);
                }
                Err(err) => {
                    println!("Error: {}", err);
                    tracing::warn!("Failed to import {:?}: {:?}", song.original, err);
                    summary.record_error(&song.original, &err);

                    if err.is_unauthorized() {
                        println!("\nToken expired! Please update the token and try again.");
                        aborted = true;
                        break;
                    }
                }
            }
        }

        RunOutcome {
            summary,
            processed,
            aborted,
        }
    }

    async fn process_song(&self, song: &SongQuery) -> Result<SongOutcome, CatalogError> {
        let candidates = self.client.search_songs(&song.search_term()).await?;

        if self.settings.verbose {
            println!("\n  API returned {} results:", candidates.len());
            for candidate in &candidates {
                println!(
                    "    - [{}] \"{}\" by {}",
                    candidate.id, candidate.name, candidate.artist
                );
            }
        }

        let Some(best) = best_match(&candidates, &song.title, &song.artist) else {
            return Ok(SongOutcome::NotFound);
        };

        tracing::debug!(
            tier = ?best.tier,
            "Matched {:?} to catalog song {} ({} by {})",
            song.original,
            best.candidate.id,
            best.candidate.name,
            best.candidate.artist
        );

        self.client.add_to_library(&best.candidate.id).await?;

        Ok(SongOutcome::Added(best.candidate.clone()))
    }
}

/// Print the tally, then persist the summary.
///
/// The tally is printed first so a results file that cannot be written still
/// leaves the counts on screen.
pub fn report_catalog_run(outcome: &RunOutcome<AddedSong>, results_path: &Path) -> Result<()> {
    debug_assert_eq!(outcome.summary.total(), outcome.processed);
    print!("{}", catalog_report(outcome));
    outcome.summary.write_json(results_path)?;
    println!("\nResults saved to {}", results_path.display());

    Ok(())
}

fn catalog_report(outcome: &RunOutcome<AddedSong>) -> String {
    let mut report = String::from("\n==========================\n");
    if outcome.aborted {
        report.push_str(&format!(
            "Run stopped after {} songs: credentials were rejected.\n",
            outcome.processed
        ));
    }
    report.push_str(&outcome.summary.tally());
    report
}
