use reqwest::Client;
use url::Url;

use super::{AppleMusicApi, AppleMusicCredentials, with_web_headers};
use crate::ports::catalog::CatalogError;

fn add_request_url(api: &AppleMusicApi, song_id: &str) -> Url {
    let mut url = api.library_url.clone();
    url.query_pairs_mut()
        .append_pair("ids[songs]", song_id)
        .append_pair("representation", "ids");
    url
}

/// Add a catalog song to the signed-in user's library.
///
/// The endpoint answers with an empty body; any 2xx status means success.
pub async fn add_song_to_library(
    client: &Client,
    api: &AppleMusicApi,
    credentials: &AppleMusicCredentials,
    song_id: &str,
) -> Result<(), CatalogError> {
    let url = add_request_url(api, song_id);

    tracing::debug!("Adding song {} to library", song_id);

    let response = with_web_headers(client.post(url), credentials)
        .body(Vec::new())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Adding song {} failed with status {}", song_id, status);
        return Err(CatalogError::from_status(status));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    #[test]
    fn test_add_request_url() {
        let api = AppleMusicApi::from_config(&CatalogConfig::default()).unwrap();
        let url = add_request_url(&api, "1440833098");

        assert_eq!(
            url.as_str(),
            concat!(
                "https://amp-api.music.apple.com/v1/me/library",
                "?ids%5Bsongs%5D=1440833098&representation=ids"
            )
        );

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("ids[songs]".to_string(), "1440833098".to_string()),
                ("representation".to_string(), "ids".to_string()),
            ]
        );
    }
}
