use reqwest::Client;

use crate::apple_music_rs::library::add_song_to_library;
use crate::apple_music_rs::search::search_catalog;
use crate::apple_music_rs::{AppleMusicApi, AppleMusicCredentials};
use crate::ports::catalog::{CatalogClient, CatalogError, CatalogSong};

pub struct AppleMusicHttpAdapter {
    client: Client,
    api: AppleMusicApi,
    credentials: AppleMusicCredentials,
}

impl AppleMusicHttpAdapter {
    pub fn new(api: AppleMusicApi, credentials: AppleMusicCredentials) -> Self {
        Self {
            client: Client::new(),
            api,
            credentials,
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for AppleMusicHttpAdapter {
    async fn search_songs(&self, term: &str) -> Result<Vec<CatalogSong>, CatalogError> {
        search_catalog(&self.client, &self.api, &self.credentials, term).await
    }

    async fn add_to_library(&self, song_id: &str) -> Result<(), CatalogError> {
        add_song_to_library(&self.client, &self.api, &self.credentials, song_id).await
    }
}
