use crate::matcher::Candidate;

/// Decoupled representation of a catalog song from the search API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CatalogSong {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub url: String,
}

impl Candidate for CatalogSong {
    fn name(&self) -> &str {
        &self.name
    }

    fn artist(&self) -> &str {
        &self.artist
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP 401. The tokens have expired and every further call would fail too.
    #[error("Unauthorized - token may be expired")]
    Unauthorized,
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Self::Unauthorized;
        }
        Self::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Port trait wrapping the catalog search and library-add endpoints.
///
/// Implementations live in `services::catalog::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog, best results first.
    async fn search_songs(&self, term: &str) -> Result<Vec<CatalogSong>, CatalogError>;

    async fn add_to_library(&self, song_id: &str) -> Result<(), CatalogError>;
}
