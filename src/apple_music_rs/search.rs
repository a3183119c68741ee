use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{AppleMusicApi, AppleMusicCredentials, with_web_headers};
use crate::ports::catalog::{CatalogError, CatalogSong};

/* ---------- Response envelope (format[resources]=map) ---------- */

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<SearchResults>,
    #[serde(default)]
    pub resources: Option<SearchResources>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub songs: Option<ResultGroup>,
}

/// Ranked references into `resources`.
#[derive(Debug, Default, Deserialize)]
pub struct ResultGroup {
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResources {
    /// Song id to resource, in document order.
    #[serde(default)]
    pub songs: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SongResource {
    #[serde(default)]
    pub attributes: Option<SongAttributes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SongResource {
    fn into_catalog_song(self, id: String) -> CatalogSong {
        let attributes = self.attributes.unwrap_or_default();
        CatalogSong {
            id,
            name: attributes.name.unwrap_or_default(),
            artist: attributes.artist_name.unwrap_or_default(),
            album: attributes.album_name.unwrap_or_default(),
            url: attributes.url.unwrap_or_default(),
        }
    }
}

impl SearchResponse {
    /// Flatten the song resources, ordered by the ranking in `results` when the
    /// response carries one. Unranked songs keep document order after ranked ones.
    pub fn into_songs(self) -> Result<Vec<CatalogSong>, serde_json::Error> {
        let resources = self.resources.unwrap_or_default();
        let mut songs = resources
            .songs
            .into_iter()
            .map(|(id, value)| {
                let resource: SongResource = serde_json::from_value(value)?;
                Ok(resource.into_catalog_song(id))
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        let ranking: Vec<String> = self
            .results
            .and_then(|results| results.songs)
            .map(|group| group.data.into_iter().map(|r| r.id).collect())
            .unwrap_or_default();

        if !ranking.is_empty() {
            songs.sort_by_key(|song| {
                ranking
                    .iter()
                    .position(|id| *id == song.id)
                    .unwrap_or(usize::MAX)
            });
        }

        Ok(songs)
    }
}

/* ---------- Search ---------- */

fn search_request_url(api: &AppleMusicApi, term: &str) -> Url {
    let mut url = api.search_url.clone();
    url.query_pairs_mut()
        .append_pair("format[resources]", "map")
        .append_pair("l", &api.locale)
        .append_pair("limit", &api.search_limit.to_string())
        .append_pair("platform", "web")
        .append_pair("term", term)
        .append_pair("types", "songs");
    url
}

pub async fn search_catalog(
    client: &Client,
    api: &AppleMusicApi,
    credentials: &AppleMusicCredentials,
    term: &str,
) -> Result<Vec<CatalogSong>, CatalogError> {
    let url = search_request_url(api, term);

    tracing::debug!("Searching catalog for {:?}", term);

    let response = with_web_headers(client.get(url), credentials)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Catalog search for {:?} failed with status {}", term, status);
        return Err(CatalogError::from_status(status));
    }

    let body = response.text().await?;
    let parsed: SearchResponse = serde_json::from_str(&body)?;
    let songs = parsed.into_songs()?;

    tracing::debug!("Catalog search for {:?} returned {} songs", term, songs.len());

    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn parse(json: &str) -> Vec<CatalogSong> {
        serde_json::from_str::<SearchResponse>(json)
            .unwrap()
            .into_songs()
            .unwrap()
    }

    #[test]
    fn test_parse_map_response_in_ranked_order() {
        let json = r#"{
            "results": {
                "songs": {
                    "data": [
                        { "id": "200", "type": "songs" },
                        { "id": "100", "type": "songs" }
                    ]
                }
            },
            "resources": {
                "songs": {
                    "100": {
                        "id": "100",
                        "type": "songs",
                        "attributes": {
                            "name": "Hello",
                            "artistName": "Lionel Richie",
                            "albumName": "Can't Slow Down",
                            "url": "https://music.apple.com/song/100"
                        }
                    },
                    "200": {
                        "id": "200",
                        "type": "songs",
                        "attributes": {
                            "name": "Hello",
                            "artistName": "Adele",
                            "albumName": "25",
                            "url": "https://music.apple.com/song/200"
                        }
                    }
                }
            }
        }"#;

        let songs = parse(json);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, "200");
        assert_eq!(songs[0].artist, "Adele");
        assert_eq!(songs[0].album, "25");
        assert_eq!(songs[1].id, "100");
        assert_eq!(songs[1].url, "https://music.apple.com/song/100");
    }

    #[test]
    fn test_parse_without_ranking_keeps_document_order() {
        let json = r#"{
            "resources": {
                "songs": {
                    "9": { "attributes": { "name": "B", "artistName": "Y" } },
                    "1": { "attributes": { "name": "A", "artistName": "X" } }
                }
            }
        }"#;

        let songs = parse(json);
        assert_eq!(songs[0].id, "9");
        assert_eq!(songs[1].id, "1");
    }

    #[test]
    fn test_parse_missing_attributes_become_empty() {
        let json = r#"{ "resources": { "songs": { "5": { "id": "5" } } } }"#;

        let songs = parse(json);
        assert_eq!(songs[0].name, "");
        assert_eq!(songs[0].artist, "");
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse("{}").is_empty());
        assert!(parse(r#"{ "results": {} }"#).is_empty());
    }

    #[test]
    fn test_search_request_url() {
        let api = AppleMusicApi::from_config(&CatalogConfig::default()).unwrap();
        let url = search_request_url(&api, "Rock & Roll Led Zeppelin");

        assert_eq!(
            url.as_str(),
            concat!(
                "https://amp-api-edge.music.apple.com/v1/catalog/in/search",
                "?format%5Bresources%5D=map&l=en-GB&limit=5&platform=web",
                "&term=Rock+%26+Roll+Led+Zeppelin&types=songs"
            )
        );
    }

    #[test]
    fn test_search_request_url_decodes_to_exact_pairs() {
        let config = CatalogConfig {
            storefront: "us".into(),
            locale: "en-US".into(),
            search_limit: 3,
            ..CatalogConfig::default()
        };
        let api = AppleMusicApi::from_config(&config).unwrap();
        let url = search_request_url(&api, "Hello Adele");

        assert_eq!(url.path(), "/v1/catalog/us/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("format[resources]".to_string(), "map".to_string()),
                ("l".to_string(), "en-US".to_string()),
                ("limit".to_string(), "3".to_string()),
                ("platform".to_string(), "web".to_string()),
                ("term".to_string(), "Hello Adele".to_string()),
                ("types".to_string(), "songs".to_string()),
            ]
        );
    }
}
