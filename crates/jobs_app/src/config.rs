use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobs_core::{default_repositories, Repository};
use jobs_engine::{FetchSettings, DEFAULT_REVALIDATE_SECS, GITHUB_GRAPHQL_ENDPOINT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid page url {url:?}: {source}")]
    PageUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Application settings. Every field is optional in the RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sources to aggregate, in display order.
    pub repositories: Vec<Repository>,
    /// Directory holding the saved filters and job snapshot.
    pub storage_dir: PathBuf,
    /// Page the shareable link points at.
    pub page_url: String,
    /// Age after which the saved job list is fetched again.
    pub revalidate_secs: i64,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repositories: default_repositories(),
            storage_dir: PathBuf::from("./.jobs_state"),
            page_url: "http://localhost:3000/jobs".to_string(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub endpoint: String,
    pub issues_per_repo: u32,
    pub labels_per_issue: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            endpoint: GITHUB_GRAPHQL_ENDPOINT.to_string(),
            issues_per_repo: settings.issues_per_repo,
            labels_per_issue: settings.labels_per_issue,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|err| err.to_string())
    }

    /// Loads `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn page_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.page_url).map_err(|source| ConfigError::PageUrl {
            url: self.page_url.clone(),
            source,
        })
    }

    pub fn revalidate(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.revalidate_secs.max(0))
    }

    /// Fetch settings with the token read from `GITHUB_TOKEN`.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            endpoint: self.fetch.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            issues_per_repo: self.fetch.issues_per_repo,
            labels_per_issue: self.fetch.labels_per_issue,
            ..FetchSettings::from_env()
        }
    }
}
