use color_eyre::eyre::{Result, WrapErr};
use reqwest::RequestBuilder;
use url::Url;

use crate::config::CatalogConfig;

pub mod library;
pub mod search;

const ORIGIN: &str = "https://music.apple.com";
const REFERER: &str = "https://music.apple.com/";
// The web API only answers requests that look like they come from the web player.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.6 Safari/605.1.15";

pub const BEARER_TOKEN_VAR: &str = "APPLE_BEARER_TOKEN";
pub const MEDIA_USER_TOKEN_VAR: &str = "APPLE_MEDIA_USER_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Missing required environment variables: {}\n\n\
     Copy them from the browser dev tools while logged into music.apple.com (Network tab > any API request):\n  \
     {}     - the Authorization header, without the \"Bearer \" prefix\n  \
     {} - the media-user-token header",
    .missing.join(", "),
    BEARER_TOKEN_VAR,
    MEDIA_USER_TOKEN_VAR
)]
pub struct MissingCredentials {
    pub missing: Vec<&'static str>,
}

/// Both tokens the web API expects on every request.
#[derive(Clone)]
pub struct AppleMusicCredentials {
    bearer_token: String,
    media_user_token: String,
}

impl std::fmt::Debug for AppleMusicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleMusicCredentials")
            .field("bearer_token", &"<redacted>")
            .field("media_user_token", &"<redacted>")
            .finish()
    }
}

impl AppleMusicCredentials {
    /// Empty strings count as missing.
    pub fn new(
        bearer_token: Option<String>,
        media_user_token: Option<String>,
    ) -> Result<Self, MissingCredentials> {
        let bearer_token = bearer_token.filter(|t| !t.trim().is_empty());
        let media_user_token = media_user_token.filter(|t| !t.trim().is_empty());

        match (bearer_token, media_user_token) {
            (Some(bearer_token), Some(media_user_token)) => Ok(Self {
                bearer_token,
                media_user_token,
            }),
            (bearer_token, media_user_token) => {
                let mut missing = Vec::new();
                if bearer_token.is_none() {
                    missing.push(BEARER_TOKEN_VAR);
                }
                if media_user_token.is_none() {
                    missing.push(MEDIA_USER_TOKEN_VAR);
                }
                Err(MissingCredentials { missing })
            }
        }
    }
}

/// Endpoints and query settings for the web API.
#[derive(Debug, Clone)]
pub struct AppleMusicApi {
    pub search_url: Url,
    pub library_url: Url,
    pub locale: String,
    pub search_limit: u32,
}

impl AppleMusicApi {
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let catalog_base = Url::parse(&config.catalog_base_url)
            .wrap_err_with(|| format!("Invalid catalog URL: {}", config.catalog_base_url))?;
        let library_base = Url::parse(&config.library_base_url)
            .wrap_err_with(|| format!("Invalid library URL: {}", config.library_base_url))?;

        let search_url = catalog_base
            .join(&format!("v1/catalog/{}/search", config.storefront))
            .wrap_err("Failed to build catalog search URL")?;
        let library_url = library_base
            .join("v1/me/library")
            .wrap_err("Failed to build library URL")?;

        Ok(Self {
            search_url,
            library_url,
            locale: config.locale.clone(),
            search_limit: config.search_limit,
        })
    }
}

fn with_web_headers(
    request: RequestBuilder,
    credentials: &AppleMusicCredentials,
) -> RequestBuilder {
    request
        .header("Accept", "*/*")
        .header(
            "Authorization",
            format!("Bearer {}", credentials.bearer_token),
        )
        .header("media-user-token", &credentials.media_user_token)
        .header("Origin", ORIGIN)
        .header("Referer", REFERER)
        .header("User-Agent", USER_AGENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_present() {
        let creds = AppleMusicCredentials::new(Some("abc".into()), Some("def".into()));
        assert!(creds.is_ok());
    }

    #[test]
    fn test_credentials_both_missing() {
        let err = AppleMusicCredentials::new(None, Some("  ".into())).unwrap_err();
        assert_eq!(err.missing, vec![BEARER_TOKEN_VAR, MEDIA_USER_TOKEN_VAR]);
        assert!(err.to_string().starts_with(
            "Missing required environment variables: APPLE_BEARER_TOKEN, APPLE_MEDIA_USER_TOKEN"
        ));
    }

    #[test]
    fn test_credentials_one_missing() {
        let err = AppleMusicCredentials::new(Some("abc".into()), None).unwrap_err();
        assert_eq!(err.missing, vec![MEDIA_USER_TOKEN_VAR]);
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = AppleMusicCredentials::new(Some("secret1".into()), Some("secret2".into()))
            .unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret1"));
        assert!(!debug.contains("secret2"));
    }

    #[test]
    fn test_api_urls_from_default_config() {
        let api = AppleMusicApi::from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(
            api.search_url.as_str(),
            "https://amp-api-edge.music.apple.com/v1/catalog/in/search"
        );
        assert_eq!(
            api.library_url.as_str(),
            "https://amp-api.music.apple.com/v1/me/library"
        );
        assert_eq!(api.locale, "en-GB");
        assert_eq!(api.search_limit, 5);
    }

    #[test]
    fn test_api_invalid_url() {
        let config = CatalogConfig {
            catalog_base_url: "not a url".into(),
            ..CatalogConfig::default()
        };
        let err = AppleMusicApi::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid catalog URL"));
    }
}
