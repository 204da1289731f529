//! Error types and the resource fetcher used by the CLI.

use std::fmt::{self, Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;
use woc_i18n::{FetchError, FetchResult, ResourceFetcher};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const LOCAL_HOST: &str = "localhost";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Where translation resources are read from.
#[derive(Debug, Clone)]
pub(crate) enum SiteFetcher {
    /// A checked-out copy of the site; resource paths resolve under `root`.
    Directory { root: PathBuf },
    /// A deployed site; resource paths are joined onto `origin`.
    Http { client: Client, origin: Url },
}

impl SiteFetcher {
    /// Interpret `--site` as an `http(s)` URL or a local directory.
    pub(crate) fn from_site(site: &str) -> CliResult<Self> {
        let trimmed = site.trim();
        if trimmed.is_empty() {
            return Err(CliError::validation("--site must not be empty"));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let origin = Url::parse(trimmed)
                .map_err(|err| CliError::validation(format!("invalid site URL '{trimmed}': {err}")))?;
            let client = Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
            return Ok(Self::Http { client, origin });
        }
        let root = PathBuf::from(trimmed);
        if !root.is_dir() {
            return Err(CliError::validation(format!(
                "site directory '{}' does not exist",
                root.display()
            )));
        }
        Ok(Self::Directory { root })
    }

    /// Host name used to pick the deployment base path when `--host` is absent.
    pub(crate) fn default_host(&self) -> String {
        match self {
            Self::Directory { .. } => LOCAL_HOST.to_string(),
            Self::Http { origin, .. } => origin.host_str().unwrap_or(LOCAL_HOST).to_string(),
        }
    }

    async fn read_file(root: &Path, url: &str) -> FetchResult<String> {
        let path = root.join(url.trim_start_matches('/'));
        debug!(path = %path.display(), "reading translation resource");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                },
                _ => FetchError::Transport {
                    url: url.to_string(),
                    detail: err.to_string(),
                },
            })
    }

    async fn get(client: &Client, origin: &Url, url: &str) -> FetchResult<String> {
        let transport = |detail: String| FetchError::Transport {
            url: url.to_string(),
            detail,
        };
        let target = origin.join(url).map_err(|err| transport(err.to_string()))?;
        debug!(url = %target, "requesting translation resource");
        let response = client
            .get(target)
            .send()
            .await
            .map_err(|err| transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|err| transport(err.to_string()))
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for SiteFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        match self {
            Self::Directory { root } => Self::read_file(root, url).await,
            Self::Http { client, origin } => Self::get(client, origin, url).await,
        }
    }
}
