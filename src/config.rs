use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default song list, one `Title - Artist` per line
    pub songs_file: String,
    pub catalog: CatalogConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub catalog_base_url: String,
    pub library_base_url: String,
    /// Two-letter storefront the catalog is searched in
    pub storefront: String,
    pub locale: String,
    pub search_limit: u32,
    /// Pause between records
    pub delay_ms: u64,
    /// Records processed per run unless overridden
    pub default_limit: usize,
    pub results_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub playlist_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            songs_file: "songs.txt".to_string(),
            catalog: CatalogConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: "https://amp-api-edge.music.apple.com".to_string(),
            library_base_url: "https://amp-api.music.apple.com".to_string(),
            storefront: "in".to_string(),
            locale: "en-GB".to_string(),
            search_limit: 5,
            delay_ms: 150,
            default_limit: 10,
            results_file: "results.json".to_string(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            playlist_name: "Imported Songs".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-import").join("config.toml"))
    }

    /// Load the default config file, falling back to defaults when it doesn't exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the defaults to `path` unless a file is already there
    pub fn write_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(path, contents)
            .wrap_err(format!("Failed to write config file: {}", path.display()))?;
        Ok(true)
    }

    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_eyre("No config directory on this platform")?;
        if Self::write_default(&path)? {
            tracing::info!("Created default config at {}", path.display());
        } else {
            tracing::info!("Config already exists at {}", path.display());
        }
        Ok(path)
    }

    /// Expand ~ to home directory
    fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn songs_path(&self) -> PathBuf {
        Self::expand_path(&self.songs_file)
    }

    pub fn results_path(&self) -> PathBuf {
        Self::expand_path(&self.catalog.results_file)
    }
}
